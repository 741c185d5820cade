//! Ready-made plots: shape the input, pick the canvas and defaults, and hand
//! back a [`Plot`] that can still be annotated before rendering.

use tracing::debug;

use crate::{
    core::{
        bounds::{Limits, extend_limits},
        color::{BORDER_COLOR, Color, NamedColor, SERIES_CYCLE},
        config::PlotConfig,
        constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
        error::PlotError,
        scale::ScaleTransform,
    },
    render::{
        bar::BarCanvas,
        boxplot::{BoxCanvas, FiveNumber, ROWS_PER_SERIES},
        density::DensityCanvas,
        heatmap::HeatmapCanvas,
        pixel::{PixelCanvas, PixelKind},
        plot::{Location, Plot},
    },
};

/// Knobs shared by every constructor.
#[derive(Clone, Debug)]
pub struct Options {
    /// Canvas columns.
    pub width: usize,
    /// Canvas rows.
    pub height: usize,
    pub kind: PixelKind,
    pub xlim: Limits,
    pub ylim: Limits,
    /// Colour range of heatmaps.
    pub zlim: Limits,
    pub xscale: ScaleTransform,
    pub yscale: ScaleTransform,
    /// Colour of the first series; the plot's colour cycle when `None`.
    pub color: Option<Color>,
    /// Glyph of bar plots.
    pub symbol: char,
    pub config: PlotConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            kind: PixelKind::default(),
            xlim: Limits::AUTO,
            ylim: Limits::AUTO,
            zlim: Limits::AUTO,
            xscale: ScaleTransform::IDENTITY,
            yscale: ScaleTransform::IDENTITY,
            color: None,
            symbol: BarCanvas::DEFAULT_SYMBOL,
            config: PlotConfig::default(),
        }
    }
}

/// `(origin, extent)` of the data window for an x/y plot.
fn window(xs: &[f64], ys: &[f64], opts: &Options) -> ((f64, f64), (f64, f64)) {
    let (xlo, xhi) = extend_limits(xs, opts.xlim);
    let (ylo, yhi) = extend_limits(ys, opts.ylim);
    ((xlo, ylo), (xhi - xlo, yhi - ylo))
}

/// Lines along `x = 0` and `y = 0` wherever they cross the window, drawn
/// before any series so data stays on top.
fn zero_axes(plot: &mut Plot, (x0, y0): (f64, f64), (w, h): (f64, f64)) -> Result<(), PlotError> {
    if !plot.config().grid {
        return Ok(());
    }
    let (x1, y1) = (x0 + w, y0 + h);
    let spans_zero = |a: f64, b: f64| a.min(b) <= 0.0 && 0.0 <= a.max(b);
    let canvas = plot.canvas_mut();
    if spans_zero(y0, y1) {
        canvas.plot_line((x0, 0.0), (x1, 0.0), BORDER_COLOR)?;
    }
    if spans_zero(x0, x1) {
        canvas.plot_line((0.0, y0), (0.0, y1), BORDER_COLOR)?;
    }
    Ok(())
}

fn pixel_plot(xs: &[f64], ys: &[f64], opts: &Options) -> Result<Plot, PlotError> {
    PlotError::check_len("x/y", xs.len(), ys.len())?;
    let (origin, extent) = window(xs, ys, opts);
    let canvas = PixelCanvas::new(
        opts.kind,
        (opts.width, opts.height),
        origin,
        extent,
        (opts.xscale, opts.yscale),
    )?;
    let mut plot = Plot::new(canvas, opts.config.clone());
    zero_axes(&mut plot, origin, extent)?;
    Ok(plot)
}

/// Consecutive points joined by line segments.
pub fn lineplot(xs: &[f64], ys: &[f64], opts: &Options) -> Result<Plot, PlotError> {
    let mut plot = pixel_plot(xs, ys, opts)?;
    plot.lines(xs, ys, opts.color)?;
    plot.label_axes();
    debug!(points = xs.len(), "lineplot built");
    Ok(plot)
}

/// Unconnected points.
pub fn scatterplot(xs: &[f64], ys: &[f64], opts: &Options) -> Result<Plot, PlotError> {
    let mut plot = pixel_plot(xs, ys, opts)?;
    plot.points(xs, ys, opts.color)?;
    plot.label_axes();
    debug!(points = xs.len(), "scatterplot built");
    Ok(plot)
}

/// Points binned per character cell and shaded by how many landed there.
pub fn densityplot(xs: &[f64], ys: &[f64], opts: &Options) -> Result<Plot, PlotError> {
    PlotError::check_len("x/y", xs.len(), ys.len())?;
    let (origin, extent) = window(xs, ys, opts);
    let canvas = DensityCanvas::new(
        (opts.width, opts.height),
        origin,
        extent,
        (opts.xscale, opts.yscale),
    )?;
    let mut plot = Plot::new(canvas, opts.config.clone());
    zero_axes(&mut plot, origin, extent)?;
    plot.points(xs, ys, opts.color)?;
    plot.label_axes();
    debug!(points = xs.len(), "densityplot built");
    Ok(plot)
}

/// One labelled horizontal bar per value, top to bottom.
pub fn barplot<S: AsRef<str>>(
    labels: &[S],
    values: &[f64],
    opts: &Options,
) -> Result<Plot, PlotError> {
    PlotError::check_len("labels/values", labels.len(), values.len())?;
    let color = opts.color.unwrap_or(Color::Named(NamedColor::Green));
    let mut canvas = BarCanvas::new(opts.width, opts.xscale)?.with_symbol(opts.symbol)?;
    for &v in values {
        canvas.add_bar(v, color)?;
    }
    let mut plot = Plot::new(canvas, opts.config.clone());
    for (row, label) in labels.iter().enumerate() {
        plot.annotate_row(Location::Left, row, label.as_ref(), Color::Normal)?;
    }
    debug!(bars = values.len(), "barplot built");
    Ok(plot)
}

/// Matrix drawn cell by cell through the configured colormap, with a colour
/// bar.  Row 0 of `matrix` is the top row.
pub fn heatmap(matrix: &[Vec<f64>], opts: &Options) -> Result<Plot, PlotError> {
    let mrows = matrix.len();
    let mcols = matrix.first().map_or(0, Vec::len);
    let (w, h) = (mcols.min(opts.width).max(1), mrows.min(opts.height).max(1));

    let flat: Vec<f64> = matrix.iter().flatten().copied().collect();
    let range = extend_limits(&flat, opts.zlim);

    let mut canvas = HeatmapCanvas::new(
        (w, h),
        (0.0, 0.0),
        (mcols.max(1) as f64, mrows.max(1) as f64),
        (ScaleTransform::IDENTITY, ScaleTransform::IDENTITY),
    )?;
    canvas.fill(matrix, &opts.config.colormap, range)?;

    let mut cfg = opts.config.clone();
    cfg.colorbar = true;
    cfg.colorbar_lim = range;
    debug!(rows = mrows, cols = mcols, ?range, "heatmap built");
    Ok(Plot::new(canvas, cfg))
}

/// Box-and-whisker summary per named series on a shared value axis.
pub fn boxplot<S: AsRef<str>>(series: &[(S, Vec<f64>)], opts: &Options) -> Result<Plot, PlotError> {
    let stats = series
        .iter()
        .map(|(name, data)| {
            FiveNumber::from_data(data).ok_or_else(|| {
                PlotError::argument(format!(
                    "series `{}` has no finite values",
                    name.as_ref()
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let all: Vec<f64> = stats.iter().flat_map(|s| [s.min, s.max]).collect();
    let (lo, hi) = extend_limits(&all, opts.xlim);
    let mut canvas = BoxCanvas::new(opts.width, lo, hi - lo, opts.xscale)?;
    for (i, s) in stats.iter().enumerate() {
        let color = match (i, opts.color) {
            (0, Some(c)) => c,
            _ => SERIES_CYCLE[i % SERIES_CYCLE.len()],
        };
        canvas.add_series(*s, color)?;
    }

    let mut plot = Plot::new(canvas, opts.config.clone());
    for (i, (name, _)) in series.iter().enumerate() {
        plot.annotate_row(
            Location::Left,
            i * ROWS_PER_SERIES + 1,
            name.as_ref(),
            Color::Normal,
        )?;
    }
    plot.label_axes();
    debug!(series = series.len(), "boxplot built");
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{border::BorderStyle, color::Rgb, colormap::Colormap, scale::Scale},
        render::canvas::Canvas,
    };

    fn small() -> Options {
        Options {
            width: 10,
            height: 4,
            ..Options::default()
        }
    }

    #[test]
    fn lineplot_labels_its_limits() {
        let p = lineplot(&[0.0, 1.0, 2.0], &[1.0, 3.0, 2.0], &small()).unwrap();
        assert_eq!(p.row_label(Location::Left, 0).map(|l| l.text.as_str()), Some("3"));
        assert_eq!(p.row_label(Location::Left, 3).map(|l| l.text.as_str()), Some("1"));
        assert_eq!(p.decoration(Location::BottomLeft).map(|l| l.text.as_str()), Some("0"));
        assert_eq!(p.decoration(Location::BottomRight).map(|l| l.text.as_str()), Some("2"));
    }

    fn lit_cells(p: &Plot) -> Vec<(usize, usize)> {
        let Canvas::Pixel(c) = p.canvas() else {
            panic!("expected a pixel canvas");
        };
        (0..4)
            .flat_map(|r| (0..10).map(move |col| (col, r)))
            .filter(|&(col, r)| c.mask(col, r) != 0)
            .collect()
    }

    #[test]
    fn grid_draws_zero_axes_only_when_enabled() {
        let opts = |grid: bool| Options {
            xlim: Limits::new(-1.0, 1.0),
            ylim: Limits::new(-1.0, 1.0),
            config: PlotConfig::builder().grid(grid).build().unwrap(),
            ..small()
        };
        let plain = scatterplot(&[0.9], &[0.9], &opts(false)).unwrap();
        assert_eq!(lit_cells(&plain), vec![(9, 0)]);

        let grid = scatterplot(&[0.9], &[0.9], &opts(true)).unwrap();
        let lit = lit_cells(&grid);
        // x = 0 is column 5, y = 0 is row 2
        assert!((0..4).all(|r| lit.contains(&(5, r))), "{lit:?}");
        assert!((0..10).all(|c| lit.contains(&(c, 2))), "{lit:?}");
        assert!(lit.contains(&(9, 0)));
        assert!(!lit.contains(&(0, 0)));
    }

    #[test]
    fn grid_skips_axes_outside_the_window() {
        let opts = Options {
            xlim: Limits::new(1.0, 2.0),
            ylim: Limits::new(1.0, 2.0),
            config: PlotConfig::builder().grid(true).build().unwrap(),
            ..small()
        };
        let p = lineplot(&[2.0], &[2.0], &opts).unwrap();
        assert_eq!(lit_cells(&p), vec![(9, 0)]);
    }

    #[test]
    fn mismatched_series_are_rejected() {
        assert!(matches!(
            scatterplot(&[1.0], &[1.0, 2.0], &small()),
            Err(PlotError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            barplot(&["a", "b"], &[1.0], &small()),
            Err(PlotError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn log_axes_reject_non_positive_data() {
        let opts = Options {
            yscale: Scale::Log10.into(),
            ylim: Limits::new(1.0, 100.0),
            ..small()
        };
        assert!(lineplot(&[0.0, 1.0], &[10.0, 50.0], &opts).is_ok());
        assert!(matches!(
            lineplot(&[0.0, 1.0], &[10.0, -5.0], &opts),
            Err(PlotError::Domain { .. })
        ));
    }

    #[test]
    fn barplot_rows_follow_labels() {
        let opts = Options {
            config: PlotConfig::builder().border(BorderStyle::Barplot).build().unwrap(),
            ..small()
        };
        let p = barplot(&["a", "bb"], &[2.0, 1.0], &opts).unwrap();
        assert_eq!(p.canvas().nrows(), 2);
        assert_eq!(p.row_label(Location::Left, 1).map(|l| l.text.as_str()), Some("bb"));
    }

    #[test]
    fn heatmap_enables_the_colorbar() {
        let opts = Options {
            config: PlotConfig::builder()
                .colormap(Colormap::from_colors(&[Rgb(0, 0, 0), Rgb(255, 255, 255)]).unwrap())
                .build()
                .unwrap(),
            ..small()
        };
        let p = heatmap(&[vec![0.0, 1.0], vec![2.0, 3.0]], &opts).unwrap();
        assert!(p.config().colorbar);
        assert_eq!(p.config().colorbar_lim, (0.0, 3.0));
        assert_eq!((p.canvas().ncols(), p.canvas().nrows()), (2, 2));
    }

    #[test]
    fn big_heatmaps_shrink_to_the_canvas() {
        let matrix: Vec<Vec<f64>> = (0..20)
            .map(|r| (0..30).map(|c| f64::from(r + c)).collect())
            .collect();
        let p = heatmap(&matrix, &small()).unwrap();
        assert_eq!((p.canvas().ncols(), p.canvas().nrows()), (10, 4));
    }

    #[test]
    fn boxplot_honours_inverted_limits() {
        let opts = Options {
            width: 11,
            xlim: Limits::new(10.0, 0.0),
            ..small()
        };
        let p = boxplot(&[("a", vec![0.0, 2.0, 5.0, 7.0, 10.0])], &opts).unwrap();
        assert_eq!(p.canvas().row(1, false), "├──┤ │  ├─┤");
        assert_eq!(p.decoration(Location::BottomLeft).map(|l| l.text.as_str()), Some("10"));
        assert_eq!(p.decoration(Location::BottomRight).map(|l| l.text.as_str()), Some("0"));
    }

    #[test]
    fn boxplot_labels_middle_rows() {
        let p = boxplot(
            &[("one", vec![1.0, 2.0, 3.0]), ("two", vec![2.0, 4.0, 9.0])],
            &small(),
        )
        .unwrap();
        assert_eq!(p.canvas().nrows(), 6);
        assert_eq!(p.row_label(Location::Left, 1).map(|l| l.text.as_str()), Some("one"));
        assert_eq!(p.row_label(Location::Left, 4).map(|l| l.text.as_str()), Some("two"));
        assert!(matches!(p.canvas(), Canvas::Box(_)));
        assert!(boxplot(&[("nan", vec![f64::NAN])], &small()).is_err());
    }
}
