//! Density canvas: counts hits per cell and shades relative to the busiest
//! cell.

use crate::{
    core::{color::Color, error::PlotError, scale::ScaleTransform},
    render::{canvas::push_cells, raster::Raster},
};

const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

#[derive(Clone, Debug)]
pub struct DensityCanvas {
    raster: Raster,
    counts: Vec<u32>,
    colors: Vec<Color>,
    /// Highest entry of `counts`; counts only grow.
    max: u32,
}

impl DensityCanvas {
    pub fn new(
        (width, height): (usize, usize),
        origin: (f64, f64),
        extent: (f64, f64),
        scales: (ScaleTransform, ScaleTransform),
    ) -> Result<Self, PlotError> {
        let raster = Raster::new((width, height), (1, 1), origin, extent, scales)?;
        Ok(Self {
            raster,
            counts: vec![0; width * height],
            colors: vec![Color::Normal; width * height],
            max: 0,
        })
    }

    #[inline]
    #[must_use]
    pub const fn raster(&self) -> &Raster {
        &self.raster
    }

    #[inline]
    #[must_use]
    pub fn count(&self, col: usize, row: usize) -> u32 {
        self.counts[row * self.raster.cols() + col]
    }

    fn hit(&mut self, col: usize, row: usize, color: Color) {
        let i = row * self.raster.cols() + col;
        self.counts[i] = self.counts[i].saturating_add(1);
        self.colors[i] = color;
        self.max = self.max.max(self.counts[i]);
    }

    pub fn point(&mut self, x: f64, y: f64, color: Color) -> Result<(), PlotError> {
        if let Some((col, row)) = self.raster.point(x, y)? {
            self.hit(col, row, color);
        }
        Ok(())
    }

    /// Every cell on the segment gains one hit.
    pub fn line(&mut self, a: (f64, f64), b: (f64, f64), color: Color) -> Result<(), PlotError> {
        let raster = self.raster;
        let mut last = None;
        raster.line(a, b, |col, row| {
            if last != Some((col, row)) {
                self.hit(col, row, color);
                last = Some((col, row));
            }
        })
    }

    /// Shade index in `0..=4`: empty cells are 0, the busiest cell is 4.
    fn level(count: u32, max: u32) -> usize {
        if count == 0 || max == 0 {
            return 0;
        }
        let steps = (SHADES.len() - 1) as u64;
        // ceil(count / max * steps) in integers
        let lvl = (u64::from(count) * steps).div_ceil(u64::from(max));
        lvl.min(steps) as usize
    }

    pub fn push_row(&self, buf: &mut String, row: usize, color: bool) {
        let max = self.max;
        let cols = self.raster.cols();
        let base = row * cols;
        push_cells(
            buf,
            (base..base + cols).map(|i| (SHADES[Self::level(self.counts[i], max)], self.colors[i])),
            color,
        );
    }
}
