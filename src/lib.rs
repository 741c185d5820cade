//! Public-facing crate root: re-exports of the plot builders, canvases and
//! the shared building blocks.

pub mod cli;
pub mod core;
pub mod plots;
pub mod render;

pub use core::{
    border::BorderStyle,
    bounds::Limits,
    color::{Color, ColorError, NamedColor, Rgb, colorize},
    colormap::Colormap,
    config::{PlotConfig, PlotConfigBuilder},
    error::PlotError,
    scale::{Scale, ScaleTransform},
};

pub use plots::{Options, barplot, boxplot, densityplot, heatmap, lineplot, scatterplot};

pub use render::{
    BarCanvas, BoxCanvas, Canvas, DensityCanvas, FiveNumber, HeatmapCanvas, Label, Location,
    PixelCanvas, PixelKind, Plot, output,
};
