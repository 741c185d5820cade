//! The closed set of drawing surfaces a [`Plot`](crate::render::plot::Plot)
//! can own, and the row emitter they share.

use crate::{
    core::{
        color::{Color, colorize},
        error::PlotError,
    },
    render::{
        bar::BarCanvas, boxplot::BoxCanvas, density::DensityCanvas, heatmap::HeatmapCanvas,
        pixel::PixelCanvas,
    },
};

/// Append a row of `(glyph, colour)` cells.  Neighbouring cells with the same
/// colour share one escape sequence; with `color` off only the glyphs are
/// written.
pub fn push_cells(buf: &mut String, cells: impl IntoIterator<Item = (char, Color)>, color: bool) {
    if !color {
        buf.extend(cells.into_iter().map(|(ch, _)| ch));
        return;
    }
    let mut run = String::new();
    let mut run_color = Color::Normal;
    for (ch, c) in cells {
        if c != run_color && !run.is_empty() {
            buf.push_str(&colorize(run_color, &run));
            run.clear();
        }
        run_color = c;
        run.push(ch);
    }
    buf.push_str(&colorize(run_color, &run));
}

#[derive(Clone, Debug)]
pub enum Canvas {
    /// Braille, block or ascii dots.
    Pixel(PixelCanvas),
    Density(DensityCanvas),
    Heatmap(HeatmapCanvas),
    Bar(BarCanvas),
    Box(BoxCanvas),
}

impl Canvas {
    #[must_use]
    pub fn ncols(&self) -> usize {
        match self {
            Self::Pixel(c) => c.raster().cols(),
            Self::Density(c) => c.raster().cols(),
            Self::Heatmap(c) => c.raster().cols(),
            Self::Bar(c) => c.width(),
            Self::Box(c) => c.width(),
        }
    }

    #[must_use]
    pub fn nrows(&self) -> usize {
        match self {
            Self::Pixel(c) => c.raster().rows(),
            Self::Density(c) => c.raster().rows(),
            Self::Heatmap(c) => c.raster().rows(),
            Self::Bar(c) => c.len(),
            Self::Box(c) => c.rows(),
        }
    }

    /// Data-space x range, when the canvas has a continuous x axis.
    #[must_use]
    pub fn xrange(&self) -> Option<(f64, f64)> {
        let (xlo, xhi, _, _) = match self {
            Self::Pixel(c) => c.raster().bounds(),
            Self::Density(c) => c.raster().bounds(),
            Self::Heatmap(c) => c.raster().bounds(),
            Self::Bar(_) => return None,
            Self::Box(c) => return Some(c.xrange()),
        };
        Some((xlo, xhi))
    }

    /// Data-space y range, when the canvas has a continuous y axis.
    #[must_use]
    pub fn yrange(&self) -> Option<(f64, f64)> {
        let (_, _, ylo, yhi) = match self {
            Self::Pixel(c) => c.raster().bounds(),
            Self::Density(c) => c.raster().bounds(),
            Self::Heatmap(c) => c.raster().bounds(),
            Self::Bar(_) | Self::Box(_) => return None,
        };
        Some((ylo, yhi))
    }

    /// Run every check [`Canvas::plot_point`] would run, without drawing.
    pub fn check_point(&self, x: f64, y: f64) -> Result<(), PlotError> {
        match self {
            Self::Pixel(c) => c.raster().fractions(x, y).map(drop),
            Self::Density(c) => c.raster().fractions(x, y).map(drop),
            Self::Heatmap(c) => c.raster().fractions(x, y).map(drop),
            Self::Bar(c) => c.check_point(x),
            Self::Box(c) => c.check_point(x),
        }
    }

    pub fn plot_point(&mut self, x: f64, y: f64, color: Color) -> Result<(), PlotError> {
        match self {
            Self::Pixel(c) => c.point(x, y, color),
            Self::Density(c) => c.point(x, y, color),
            Self::Heatmap(c) => c.point(x, y, color),
            Self::Bar(c) => c.point(x, y, color),
            Self::Box(c) => c.point(x, y, color),
        }
    }

    pub fn plot_line(
        &mut self,
        a: (f64, f64),
        b: (f64, f64),
        color: Color,
    ) -> Result<(), PlotError> {
        match self {
            Self::Pixel(c) => c.line(a, b, color),
            Self::Density(c) => c.line(a, b, color),
            Self::Heatmap(c) => c.line(a, b, color),
            Self::Bar(c) => c.line(a, b, color),
            Self::Box(c) => c.line(a, b, color),
        }
    }

    /// Append row `row` (0 = top).
    pub fn push_row(&self, buf: &mut String, row: usize, color: bool) {
        match self {
            Self::Pixel(c) => c.push_row(buf, row, color),
            Self::Density(c) => c.push_row(buf, row, color),
            Self::Heatmap(c) => c.push_row(buf, row, color),
            Self::Bar(c) => c.push_row(buf, row, color),
            Self::Box(c) => c.push_row(buf, row, color),
        }
    }

    #[must_use]
    pub fn row(&self, row: usize, color: bool) -> String {
        let mut s = String::with_capacity(self.ncols() * 3);
        self.push_row(&mut s, row, color);
        s
    }

    #[must_use]
    pub fn rows(&self, color: bool) -> Vec<String> {
        (0..self.nrows()).map(|r| self.row(r, color)).collect()
    }
}

macro_rules! impl_from_canvas {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Canvas {
                #[inline]
                fn from(c: $ty) -> Self {
                    Self::$variant(c)
                }
            }
        )*
    };
}

impl_from_canvas!(
    Pixel(PixelCanvas),
    Density(DensityCanvas),
    Heatmap(HeatmapCanvas),
    Bar(BarCanvas),
    Box(BoxCanvas),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        color::{NamedColor, Rgb},
        scale::ScaleTransform,
        text::strip,
    };
    use crate::render::pixel::PixelKind;

    #[test]
    fn runs_share_one_escape() {
        let red = Color::Named(NamedColor::Red);
        let mut s = String::new();
        push_cells(
            &mut s,
            [('a', red), ('b', red), (' ', Color::Normal), ('c', Color::Rgb(Rgb(1, 2, 3)))],
            true,
        );
        assert_eq!(s, "\x1b[31mab\x1b[0m \x1b[38;2;1;2;3mc\x1b[0m");
        assert_eq!(strip(&s), "ab c");
    }

    #[test]
    fn plain_cells_are_glyphs_only() {
        let mut s = String::new();
        push_cells(&mut s, [('x', Color::Indexed(3)), ('y', Color::Normal)], false);
        assert_eq!(s, "xy");
    }

    #[test]
    fn enum_dispatch_reports_geometry() {
        let c: Canvas = PixelCanvas::new(
            PixelKind::Braille,
            (6, 3),
            (-1.0, 0.0),
            (2.0, 10.0),
            (ScaleTransform::IDENTITY, ScaleTransform::IDENTITY),
        )
        .unwrap()
        .into();
        assert_eq!((c.ncols(), c.nrows()), (6, 3));
        assert_eq!(c.xrange(), Some((-1.0, 1.0)));
        assert_eq!(c.yrange(), Some((0.0, 10.0)));
        assert_eq!(c.rows(false), vec!["      "; 3]);
    }

    #[test]
    fn bars_have_no_continuous_axes() {
        let c: Canvas = BarCanvas::new(10, ScaleTransform::IDENTITY).unwrap().into();
        assert_eq!(c.nrows(), 0);
        assert_eq!(c.xrange(), None);
        assert_eq!(c.yrange(), None);
    }
}
