use std::io::{IsTerminal, stdout};

use tracing::{debug, warn};

use crate::{
    core::{
        border::BorderStyle,
        bounds::{Limits, canvas_dims, extend_limits, terminal_geometry},
        color::{Color, NamedColor, Rgb, colorize},
        colormap::{COLORMAP_NAMES, Colormap},
        config::PlotConfig,
        data::{columns, from_path, read_labeled, read_numeric},
        error::PlotError,
        scale::{Scale, ScaleTransform},
    },
    plots::{self, Options},
    render::{
        canvas::push_cells,
        output,
        pixel::PixelKind,
        plot::Plot,
    },
};

use super::parse::{BarArgs, BoxArgs, HeatmapArgs, PlotArgs, XyArgs};

/// Columns and rows kept free for labels, borders and decorations when the
/// canvas is sized from the terminal.
const RESERVED_COLS: usize = 24;
const RESERVED_ROWS: usize = 8;

#[derive(Clone, Copy, Debug)]
pub enum XyKind {
    Line,
    Scatter,
    Density,
}

fn options(a: &PlotArgs, default_border: BorderStyle) -> Result<Options, PlotError> {
    let border = match &a.border {
        Some(b) => b.parse()?,
        None => default_border,
    };
    let config = PlotConfig::builder()
        .title(a.title.as_str())
        .xlabel(a.xlabel.as_str())
        .ylabel(a.ylabel.as_str())
        .margin(a.margin)
        .padding(a.padding)
        .border(border)
        .labels(!a.no_labels)
        .grid(a.grid)
        .colormap(Colormap::named(&a.colormap)?)
        .build()?;

    let (tw, th) = canvas_dims(terminal_geometry(), RESERVED_COLS, RESERVED_ROWS);
    Ok(Options {
        width: a.width.unwrap_or(tw),
        height: a.height.unwrap_or(th),
        color: a.color.as_deref().map(Color::parse).transpose()?,
        config,
        ..Options::default()
    })
}

fn scale(name: &str) -> Result<ScaleTransform, PlotError> {
    Ok(name.parse::<Scale>()?.into())
}

/// Print or save, painting only when the destination is a terminal.
fn emit(plot: &Plot, a: &PlotArgs) -> Result<(), PlotError> {
    if let Some(path) = &a.output {
        if output::looks_like_image(path) {
            warn!(
                path = %path.display(),
                "only text output is supported; the file will contain the plot as text"
            );
        }
        return output::save(plot, path, false);
    }
    let color = !a.no_color && stdout().is_terminal();
    output::print(plot, color)
}

pub fn xy(kind: XyKind, a: &XyArgs) -> Result<(), PlotError> {
    let rows = from_path(&a.plot.file, read_numeric)?;
    let mut cols = columns(&rows);
    debug!(rows = rows.len(), columns = cols.len(), ?kind, "csv loaded");
    if cols.is_empty() {
        return Err(PlotError::argument("no data rows"));
    }

    let xs: Vec<f64> = if cols.len() == 1 {
        (1..=cols[0].len()).map(|i| i as f64).collect()
    } else {
        cols.remove(0)
    };
    let all_y: Vec<f64> = cols.iter().flatten().copied().collect();

    let mut opts = options(&a.plot, BorderStyle::Solid)?;
    opts.kind = a.canvas.parse::<PixelKind>()?;
    opts.xlim = Limits::try_from(a.xlim.as_slice())?;
    let (ylo, yhi) = extend_limits(&all_y, Limits::try_from(a.ylim.as_slice())?);
    opts.ylim = Limits::new(ylo, yhi);
    opts.xscale = scale(&a.xscale)?;
    opts.yscale = scale(&a.yscale)?;

    let (first, rest) = cols
        .split_first()
        .ok_or_else(|| PlotError::argument("no y column"))?;
    let mut plot = match kind {
        XyKind::Line => plots::lineplot(&xs, first, &opts)?,
        XyKind::Scatter => plots::scatterplot(&xs, first, &opts)?,
        XyKind::Density => plots::densityplot(&xs, first, &opts)?,
    };
    for ys in rest {
        match kind {
            XyKind::Line => plot.lines(&xs, ys, None)?,
            XyKind::Scatter | XyKind::Density => plot.points(&xs, ys, None)?,
        };
    }
    emit(&plot, &a.plot)
}

pub fn bar(a: &BarArgs) -> Result<(), PlotError> {
    let records = from_path(&a.plot.file, read_labeled)?;
    let (labels, values): (Vec<String>, Vec<f64>) = records.into_iter().unzip();

    let mut opts = options(&a.plot, BorderStyle::Barplot)?;
    opts.xscale = scale(&a.xscale)?;
    if a.plot.height.is_some() {
        debug!("--height is ignored by bar plots; they get one row per bar");
    }
    opts.symbol = a.symbol;
    let plot = plots::barplot(&labels, &values, &opts)?;
    emit(&plot, &a.plot)
}

pub fn heatmap(a: &HeatmapArgs) -> Result<(), PlotError> {
    let matrix = from_path(&a.plot.file, read_numeric)?;
    let mut opts = options(&a.plot, BorderStyle::Solid)?;
    opts.zlim = Limits::try_from(a.zlim.as_slice())?;
    if a.plot.width.is_none() && a.plot.height.is_none() {
        // one cell per entry unless the terminal is too small
        let cols = matrix.first().map_or(1, Vec::len);
        opts.width = opts.width.min(cols);
        opts.height = opts.height.min(matrix.len());
    }
    let mut plot = plots::heatmap(&matrix, &opts)?;
    plot.set_zlabel(a.zlabel.as_str());
    emit(&plot, &a.plot)
}

pub fn boxplot(a: &BoxArgs) -> Result<(), PlotError> {
    let rows = from_path(&a.plot.file, read_numeric)?;
    let series: Vec<(String, Vec<f64>)> = columns(&rows)
        .into_iter()
        .enumerate()
        .map(|(i, col)| {
            let name = a.names.get(i).cloned().unwrap_or_else(|| (i + 1).to_string());
            (name, col)
        })
        .collect();

    let mut opts = options(&a.plot, BorderStyle::Solid)?;
    opts.xlim = Limits::try_from(a.xlim.as_slice())?;
    let plot = plots::boxplot(&series, &opts)?;
    emit(&plot, &a.plot)
}

/// Pretty-print color names, colormaps and border styles.
pub fn colors() {
    println!("\nNamed colors:");
    for c in NamedColor::ALL {
        println!("  {}", colorize(c.into(), c.name()));
    }
    println!(
        "  {}  (#RRGGBB, or a palette index 0-255 such as {})",
        colorize(Rgb(0x60, 0x48, 0xc1).into(), "#6048c1"),
        colorize(Color::Indexed(208), "208"),
    );

    println!("\nColormaps (append _r to reverse):");
    for name in COLORMAP_NAMES {
        // every listed name resolves
        let Ok(map) = Colormap::named(name) else {
            continue;
        };
        let mut strip = String::new();
        push_cells(
            &mut strip,
            (0..32).map(|i| ('█', Color::Rgb(map.sample(f64::from(i) / 31.0)))),
            true,
        );
        println!("  {name:<9} {strip}");
    }

    println!("\nBorder styles:");
    for b in BorderStyle::ALL {
        let g = b.glyphs();
        println!("  {:<8} {}{}{}{}", b.name(), g.tl, g.t, g.t, g.tr);
    }
    println!();
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "termplot";
    println!(
        "
Example invocations
-------------------
• Line plot         : {bin} line data.csv --title \"Sine\" --xlabel t --ylabel \"sin(t)\"
• Several series    : {bin} line series.csv        (x,y1,y2,... per row)
• Scatter in blocks : {bin} scatter data.csv --canvas block --color light_red
• Log y axis        : {bin} line growth.csv --yscale log10
• Fixed limits      : {bin} scatter data.csv --xlim -1,1 --ylim 0,10
• Density           : {bin} density samples.csv -W 60 -H 20
• Bars              : {bin} bar counts.csv        (label,value per row)
• Heatmap           : {bin} heatmap matrix.csv --colormap inferno --zlabel K
• Box plots         : {bin} box columns.csv --names a,b,c
• Plain text file   : {bin} line data.csv --output plot.txt
• From stdin        : seq 1 20 | {bin} line -
• Debug logging     : {bin} line data.csv --debug
"
    );
}
