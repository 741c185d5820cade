//! Bar-length canvas: one horizontal bar per row, scaled against the longest
//! bar and followed by its formatted value.

use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::{
    core::{color::Color, error::PlotError, scale::ScaleTransform, text::format_num},
    render::canvas::push_cells,
};

#[derive(Clone, Debug)]
struct Bar {
    value: f64,
    /// `value` in plot space, never negative.
    plotted: f64,
    label: String,
    color: Color,
}

impl Bar {
    fn new(value: f64, plotted: f64, color: Color) -> Self {
        Self {
            value,
            plotted,
            label: format_num(value),
            color,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BarCanvas {
    width: usize,
    symbol: char,
    transform: ScaleTransform,
    bars: Vec<Bar>,
    /// Widest value label.
    label_w: usize,
    /// Longest bar in plot space.
    max_plotted: f64,
}

impl BarCanvas {
    pub const DEFAULT_SYMBOL: char = '■';

    pub fn new(width: usize, transform: ScaleTransform) -> Result<Self, PlotError> {
        if width == 0 {
            return Err(PlotError::argument("bar canvas must be at least 1 column wide"));
        }
        Ok(Self {
            width,
            symbol: Self::DEFAULT_SYMBOL,
            transform,
            bars: Vec::new(),
            label_w: 0,
            max_plotted: 0.0,
        })
    }

    /// Glyph the bars are drawn with; must occupy exactly one column.
    pub fn with_symbol(mut self, symbol: char) -> Result<Self, PlotError> {
        if symbol.width() != Some(1) {
            return Err(PlotError::argument(format!(
                "bar symbol `{symbol}` must be one column wide"
            )));
        }
        self.symbol = symbol;
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn value(&self, row: usize) -> Option<f64> {
        self.bars.get(row).map(|b| b.value)
    }

    fn plotted(&self, value: f64) -> Result<f64, PlotError> {
        if !value.is_finite() || value < 0.0 {
            return Err(PlotError::argument(format!(
                "bar values must be finite and non-negative, got {value}"
            )));
        }
        Ok(self.transform.forward(value)?.max(0.0))
    }

    /// Append a bar as a new bottom row.
    pub fn add_bar(&mut self, value: f64, color: Color) -> Result<(), PlotError> {
        let bar = Bar::new(value, self.plotted(value)?, color);
        self.label_w = self.label_w.max(bar.label.len());
        self.max_plotted = self.max_plotted.max(bar.plotted);
        self.bars.push(bar);
        debug!(row = self.bars.len() - 1, value, "bar added");
        Ok(())
    }

    /// Validate a `(value, row)` write without applying it.
    pub fn check_point(&self, x: f64) -> Result<(), PlotError> {
        if x.is_finite() && x >= 0.0 {
            self.transform.forward(x)?;
        }
        Ok(())
    }

    /// Set the bar on row `round(y)` to `x`.  Rows that do not exist and
    /// negative values are dropped.
    pub fn point(&mut self, x: f64, y: f64, color: Color) -> Result<(), PlotError> {
        if !x.is_finite() || x < 0.0 || !y.is_finite() {
            return Ok(());
        }
        let row = y.round();
        if row < 0.0 || row >= self.bars.len() as f64 {
            return Ok(());
        }
        self.bars[row as usize] = Bar::new(x, self.plotted(x)?, color);
        // a rewrite can shrink the longest bar or label
        self.label_w = self.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        self.max_plotted = self.bars.iter().map(|b| b.plotted).fold(0.0, f64::max);
        Ok(())
    }

    pub fn line(&mut self, a: (f64, f64), b: (f64, f64), color: Color) -> Result<(), PlotError> {
        self.check_point(a.0)?;
        self.check_point(b.0)?;
        self.point(a.0, a.1, color)?;
        self.point(b.0, b.1, color)
    }

    pub fn push_row(&self, buf: &mut String, row: usize, color: bool) {
        let max_bar = (self.width.saturating_sub(1 + self.label_w)).max(1);
        let bar = &self.bars[row];
        let len = if self.max_plotted > 0.0 {
            // round half up
            ((bar.plotted / self.max_plotted) * max_bar as f64 + 0.5).floor() as usize
        } else {
            0
        };
        let len = len.min(max_bar);

        let cells = std::iter::repeat_n((self.symbol, bar.color), len)
            .chain(std::iter::once((' ', Color::Normal)))
            .chain(bar.label.chars().map(|c| (c, Color::Normal)))
            .chain(std::iter::repeat((' ', Color::Normal)))
            .take(self.width);
        push_cells(buf, cells, color);
    }
}
