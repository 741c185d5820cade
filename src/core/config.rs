//! Static plot settings + fluent builder.

use crate::core::{
    border::BorderStyle,
    colormap::Colormap,
    constants::{DEFAULT_MARGIN, DEFAULT_PADDING},
    error::PlotError,
};

/// Everything about a plot that is fixed at construction time.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub zlabel: String,
    pub margin: usize,
    pub padding: usize,
    pub border: BorderStyle,
    /// Show row labels, the y label and the corner decorations.
    pub labels: bool,
    /// Zero axes behind the data of line, scatter and density plots.
    pub grid: bool,
    pub colorbar: bool,
    pub colorbar_border: BorderStyle,
    /// Range printed next to the colour bar.
    pub colorbar_lim: (f64, f64),
    pub colormap: Colormap,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            zlabel: String::new(),
            margin: DEFAULT_MARGIN,
            padding: DEFAULT_PADDING,
            border: BorderStyle::Solid,
            labels: true,
            grid: false,
            colorbar: false,
            colorbar_border: BorderStyle::Solid,
            colorbar_lim: (0.0, 1.0),
            colormap: Colormap::default(),
        }
    }
}

impl PlotConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> PlotConfigBuilder {
        PlotConfigBuilder::default()
    }
}

/// Fluent builder; validation happens once in [`PlotConfigBuilder::build`].
#[derive(Debug, Default)]
pub struct PlotConfigBuilder {
    cfg: PlotConfig,
}

impl PlotConfigBuilder {
    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.cfg.title = t.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn xlabel(mut self, s: impl Into<String>) -> Self {
        self.cfg.xlabel = s.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn ylabel(mut self, s: impl Into<String>) -> Self {
        self.cfg.ylabel = s.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn zlabel(mut self, s: impl Into<String>) -> Self {
        self.cfg.zlabel = s.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn margin(mut self, n: usize) -> Self {
        self.cfg.margin = n;
        self
    }
    #[inline]
    #[must_use]
    pub fn padding(mut self, n: usize) -> Self {
        self.cfg.padding = n;
        self
    }
    #[inline]
    #[must_use]
    pub fn border(mut self, b: BorderStyle) -> Self {
        self.cfg.border = b;
        self
    }
    #[inline]
    #[must_use]
    pub fn labels(mut self, on: bool) -> Self {
        self.cfg.labels = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn grid(mut self, on: bool) -> Self {
        self.cfg.grid = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn colorbar(mut self, on: bool) -> Self {
        self.cfg.colorbar = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn colorbar_border(mut self, b: BorderStyle) -> Self {
        self.cfg.colorbar_border = b;
        self
    }
    #[inline]
    #[must_use]
    pub fn colorbar_lim(mut self, lo: f64, hi: f64) -> Self {
        self.cfg.colorbar_lim = (lo, hi);
        self
    }
    #[inline]
    #[must_use]
    pub fn colormap(mut self, map: Colormap) -> Self {
        self.cfg.colormap = map;
        self
    }

    pub fn build(self) -> Result<PlotConfig, PlotError> {
        let (lo, hi) = self.cfg.colorbar_lim;
        if !lo.is_finite() || !hi.is_finite() {
            return Err(PlotError::argument(format!(
                "colorbar limits must be finite, got ({lo}, {hi})"
            )));
        }
        Ok(self.cfg)
    }
}

/// Ergonomic `?` on a builder chain.
impl From<PlotConfigBuilder> for Result<PlotConfig, PlotError> {
    fn from(b: PlotConfigBuilder) -> Self {
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PlotConfig::builder().build().unwrap();
        assert_eq!(cfg.margin, DEFAULT_MARGIN);
        assert_eq!(cfg.padding, DEFAULT_PADDING);
        assert_eq!(cfg.border, BorderStyle::Solid);
        assert!(cfg.labels);
        assert!(!cfg.grid);
        assert!(!cfg.colorbar);
    }

    #[test]
    fn builder_chain() {
        let cfg: Result<PlotConfig, PlotError> = PlotConfig::builder()
            .title("t")
            .ylabel("y")
            .margin(0)
            .border(BorderStyle::Ascii)
            .grid(true)
            .into();
        let cfg = cfg.unwrap();
        assert_eq!(cfg.title, "t");
        assert_eq!(cfg.ylabel, "y");
        assert_eq!(cfg.margin, 0);
        assert_eq!(cfg.border, BorderStyle::Ascii);
        assert!(cfg.grid);
    }

    #[test]
    fn rejects_non_finite_colorbar_limits() {
        assert!(
            PlotConfig::builder()
                .colorbar_lim(0.0, f64::INFINITY)
                .build()
                .is_err()
        );
    }
}
