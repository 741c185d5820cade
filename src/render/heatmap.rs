//! Heatmap canvas: one colour per cell, no sub-cell coverage.
//!
//! Matrix rows run top to bottom and columns left to right, so reading the
//! canvas in row-major order reads the matrix in row-major order.  When the
//! matrix is no larger than the canvas along an axis, entry `k` lands on
//! cell `k`; when it is larger, cell `k` takes the nearest-neighbour entry
//! `floor(k · m / n)` for `m` entries over `n` cells.

use crate::{
    core::{color::Color, colormap::Colormap, error::PlotError, scale::ScaleTransform},
    render::{canvas::push_cells, raster::Raster},
};

const FILLED: char = '█';

#[derive(Clone, Debug)]
pub struct HeatmapCanvas {
    raster: Raster,
    cells: Vec<Option<Color>>,
}

impl HeatmapCanvas {
    pub fn new(
        (width, height): (usize, usize),
        origin: (f64, f64),
        extent: (f64, f64),
        scales: (ScaleTransform, ScaleTransform),
    ) -> Result<Self, PlotError> {
        let raster = Raster::new((width, height), (1, 1), origin, extent, scales)?;
        Ok(Self {
            raster,
            cells: vec![None; width * height],
        })
    }

    #[inline]
    #[must_use]
    pub const fn raster(&self) -> &Raster {
        &self.raster
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<Color> {
        self.cells[row * self.raster.cols() + col]
    }

    pub fn point(&mut self, x: f64, y: f64, color: Color) -> Result<(), PlotError> {
        if let Some((col, row)) = self.raster.point(x, y)? {
            self.cells[row * self.raster.cols() + col] = Some(color);
        }
        Ok(())
    }

    pub fn line(&mut self, a: (f64, f64), b: (f64, f64), color: Color) -> Result<(), PlotError> {
        let raster = self.raster;
        let cols = raster.cols();
        raster.line(a, b, |col, row| self.cells[row * cols + col] = Some(color))
    }

    /// Colour every cell from `matrix` through `map`, normalised against
    /// `range`.  Rows must all have the same length.
    pub fn fill(
        &mut self,
        matrix: &[Vec<f64>],
        map: &Colormap,
        range: (f64, f64),
    ) -> Result<(), PlotError> {
        let mrows = matrix.len();
        let mcols = matrix.first().map_or(0, Vec::len);
        for row in matrix {
            PlotError::check_len("matrix row length", row.len(), mcols)?;
        }
        if mrows == 0 || mcols == 0 {
            return Ok(());
        }

        let (cols, rows) = (self.raster.cols(), self.raster.rows());
        for r in 0..rows {
            let Some(src_r) = source_index(r, mrows, rows) else {
                continue;
            };
            for c in 0..cols {
                let Some(src_c) = source_index(c, mcols, cols) else {
                    continue;
                };
                let v = matrix[src_r][src_c];
                self.cells[r * cols + c] = v.is_finite().then(|| map.quantize(v, range));
            }
        }
        Ok(())
    }

    pub fn push_row(&self, buf: &mut String, row: usize, color: bool) {
        let cols = self.raster.cols();
        let base = row * cols;
        push_cells(
            buf,
            self.cells[base..base + cols]
                .iter()
                .map(|c| c.map_or((' ', Color::Normal), |c| (FILLED, c))),
            color,
        );
    }
}

/// Matrix index shown by cell `k` when `m` entries spread over `n` cells.
#[inline]
fn source_index(k: usize, m: usize, n: usize) -> Option<usize> {
    if m <= n {
        (k < m).then_some(k)
    } else {
        Some(k * m / n)
    }
}
