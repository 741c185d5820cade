//! Aggregates the building blocks the canvases and the compositor share.

pub mod border;
pub mod bounds;
pub mod color;
pub mod colormap;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod scale;
pub mod text;

// re-export frequently-used items for convenience
pub use border::{BorderGlyphs, BorderStyle};
pub use bounds::{Limits, extend_limits};
pub use color::{AnsiCode, Color, ColorError, NamedColor, Rgb, colorize};
pub use colormap::Colormap;
pub use config::{PlotConfig, PlotConfigBuilder};
pub use error::PlotError;
pub use scale::{AxisMap, Scale, ScaleTransform};
pub use text::{format_num, strip, visible_width};
