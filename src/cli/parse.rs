use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "termplot",
    about = "Unicode and ASCII plots for the terminal, from CSV data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Log construction and layout details to stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Line plot of `x,y[,y2...]` rows (a single column is plotted against its index)
    Line(XyArgs),
    /// Scatter plot of `x,y[,y2...]` rows
    Scatter(XyArgs),
    /// Density plot of `x,y` rows
    Density(XyArgs),
    /// Horizontal bars from `label,value` rows
    Bar(BarArgs),
    /// Heatmap of a numeric matrix (one CSV row per matrix row)
    Heatmap(HeatmapArgs),
    /// Box plots, one series per CSV column
    Box(BoxArgs),
    /// Show available color names, colormaps and border styles
    Colors,
    /// Print example invocations
    Examples,
}

/// Options every plot understands.
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// CSV path (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    /// Plot title
    #[arg(short, long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub xlabel: String,

    #[arg(long, default_value = "")]
    pub ylabel: String,

    /// Canvas width in characters (fits the terminal if omitted)
    #[arg(short = 'W', long)]
    pub width: Option<usize>,

    /// Canvas height in characters (fits the terminal if omitted)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Border style: solid, bold, dashed, dotted, ascii, rounded, corners, barplot, none
    #[arg(long)]
    pub border: Option<String>,

    /// Spaces left of everything
    #[arg(long, default_value_t = crate::core::constants::DEFAULT_MARGIN)]
    pub margin: usize,

    /// Spaces between labels and the border
    #[arg(long, default_value_t = crate::core::constants::DEFAULT_PADDING)]
    pub padding: usize,

    /// Hide row labels, the y label and corner decorations
    #[arg(long)]
    pub no_labels: bool,

    /// Draw dotted zero axes (line, scatter and density plots)
    #[arg(long)]
    pub grid: bool,

    /// Series color (name, `#RRGGBB` or 0-255)
    #[arg(long)]
    pub color: Option<String>,

    /// Colormap for heatmaps and the color bar (append `_r` to reverse)
    #[arg(long, default_value = "viridis")]
    pub colormap: String,

    /// Never emit color escape sequences
    #[arg(long)]
    pub no_color: bool,

    /// Write the plot to a text file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// `termplot line|scatter|density …`
#[derive(Args, Debug)]
pub struct XyArgs {
    #[command(flatten)]
    pub plot: PlotArgs,

    /// Canvas kind: braille, block or ascii
    #[arg(long, default_value = "braille")]
    pub canvas: String,

    /// X-axis limits `LO,HI` (auto if omitted)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub xlim: Vec<f64>,

    /// Y-axis limits `LO,HI` (auto if omitted)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub ylim: Vec<f64>,

    /// X-axis scale: identity, ln, log2, log10
    #[arg(long, default_value = "identity")]
    pub xscale: String,

    /// Y-axis scale: identity, ln, log2, log10
    #[arg(long, default_value = "identity")]
    pub yscale: String,
}

/// `termplot bar …`
#[derive(Args, Debug)]
pub struct BarArgs {
    #[command(flatten)]
    pub plot: PlotArgs,

    /// Scale of the bar lengths: identity, ln, log2, log10
    #[arg(long, default_value = "identity")]
    pub xscale: String,

    /// Bar glyph
    #[arg(long, default_value_t = '■')]
    pub symbol: char,
}

/// `termplot heatmap …`
#[derive(Args, Debug)]
pub struct HeatmapArgs {
    #[command(flatten)]
    pub plot: PlotArgs,

    /// Color range `LO,HI` (data range if omitted)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub zlim: Vec<f64>,

    /// Label printed next to the color bar
    #[arg(long, default_value = "")]
    pub zlabel: String,
}

/// `termplot box …`
#[derive(Args, Debug)]
pub struct BoxArgs {
    #[command(flatten)]
    pub plot: PlotArgs,

    /// Series names, comma separated (column numbers if omitted)
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,

    /// Value-axis limits `LO,HI` (auto if omitted)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub xlim: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_limits_and_shared_options() {
        let cli = Cli::try_parse_from([
            "termplot", "line", "data.csv", "--xlim", "-1,1", "--title", "T", "-W", "30",
            "--no-color", "--grid", "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        let Command::Line(a) = cli.cmd else {
            panic!("expected line");
        };
        assert_eq!(a.xlim, vec![-1.0, 1.0]);
        assert!(a.ylim.is_empty());
        assert_eq!(a.plot.file, "data.csv");
        assert_eq!(a.plot.title, "T");
        assert_eq!(a.plot.width, Some(30));
        assert!(a.plot.no_color);
        assert!(a.plot.grid);
    }

    #[test]
    fn negative_margin_is_rejected() {
        assert!(Cli::try_parse_from(["termplot", "bar", "--margin", "-2"]).is_err());
    }
}
