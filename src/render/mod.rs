pub mod bar;
pub mod boxplot;
pub mod canvas;
pub mod density;
pub mod heatmap;
pub mod output;
pub mod pixel;
pub mod plot;
pub mod raster;

pub use bar::BarCanvas;
pub use boxplot::{BoxCanvas, FiveNumber};
pub use canvas::Canvas;
pub use density::DensityCanvas;
pub use heatmap::HeatmapCanvas;
pub use pixel::{PixelCanvas, PixelKind};
pub use plot::{Label, Location, Plot};
