//! Data space → sub-cell pixel → cell mapping shared by the grid canvases.
//!
//! A canvas of `cols × rows` characters with an `xres × yres` sub-grid per
//! character has `cols·xres × rows·yres` pixels.  Pixel `(0, 0)` is the
//! top-left corner; y grows downwards.  Continuous pixel coordinates live in
//! `[0, width] × [0, height]` and the far edge folds into the last pixel, so
//! a point exactly on the maximum of the data extent still lands on the
//! canvas.

use crate::core::{
    error::PlotError,
    scale::{AxisMap, ScaleTransform},
};

/// Slack (in axis fractions) for points that round just past an edge.
const EDGE_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug)]
pub struct Raster {
    cols: usize,
    rows: usize,
    xres: usize,
    yres: usize,
    x: AxisMap,
    y: AxisMap,
}

impl Raster {
    /// `origin` is the data-space `(min x, min y)` and `extent` the data-space
    /// `(width, height)`.
    pub fn new(
        (cols, rows): (usize, usize),
        (xres, yres): (usize, usize),
        origin: (f64, f64),
        extent: (f64, f64),
        (xscale, yscale): (ScaleTransform, ScaleTransform),
    ) -> Result<Self, PlotError> {
        if cols == 0 || rows == 0 {
            return Err(PlotError::argument(format!(
                "canvas must be at least 1×1 characters, got {cols}×{rows}"
            )));
        }
        Ok(Self {
            cols,
            rows,
            xres,
            yres,
            x: AxisMap::new(origin.0, extent.0, xscale)?,
            y: AxisMap::new(origin.1, extent.1, yscale)?,
        })
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn pixel_width(&self) -> usize {
        self.cols * self.xres
    }

    #[inline]
    #[must_use]
    pub const fn pixel_height(&self) -> usize {
        self.rows * self.yres
    }

    /// Data-space `(x_lo, x_hi, y_lo, y_hi)` of the canvas.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.x.value_at(0.0),
            self.x.value_at(1.0),
            self.y.value_at(0.0),
            self.y.value_at(1.0),
        )
    }

    /// Axis fractions for a data point; `None` when a coordinate is not
    /// finite (such points are skipped, not errors).
    #[inline]
    pub fn fractions(&self, x: f64, y: f64) -> Result<Option<(f64, f64)>, PlotError> {
        if !x.is_finite() || !y.is_finite() {
            return Ok(None);
        }
        Ok(Some((self.x.fraction(x)?, self.y.fraction(y)?)))
    }

    /// Pixel hit by a data point, or `None` when it falls off the canvas.
    pub fn point(&self, x: f64, y: f64) -> Result<Option<(usize, usize)>, PlotError> {
        let Some((fx, fy)) = self.fractions(x, y)? else {
            return Ok(None);
        };
        let inside = |f: f64| (-EDGE_EPSILON..=1.0 + EDGE_EPSILON).contains(&f);
        if !inside(fx) || !inside(fy) {
            return Ok(None);
        }
        let px = fx.clamp(0.0, 1.0) * self.pixel_width() as f64;
        let py = (1.0 - fy.clamp(0.0, 1.0)) * self.pixel_height() as f64;
        Ok(Some(self.fold(px, py)))
    }

    /// Visit every pixel on the segment between two data points.
    ///
    /// Both endpoints are projected (and so validated) before anything is
    /// visited.  The segment is clipped to the canvas first, so lines that
    /// leave the visible extent keep their visible part.
    pub fn line(
        &self,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        mut visit: impl FnMut(usize, usize),
    ) -> Result<(), PlotError> {
        let (Some(a), Some(b)) = (self.fractions(x1, y1)?, self.fractions(x2, y2)?) else {
            return Ok(());
        };
        let (w, h) = (self.pixel_width() as f64, self.pixel_height() as f64);
        let to_px = |(fx, fy): (f64, f64)| (fx * w, (1.0 - fy) * h);
        let (mut ax, mut ay) = to_px(a);
        let (mut bx, mut by) = to_px(b);
        // clip and walk from the lexicographically smaller end so a→b and
        // b→a cover the same pixels
        if bx.total_cmp(&ax).then(by.total_cmp(&ay)).is_lt() {
            (ax, ay, bx, by) = (bx, by, ax, ay);
        }

        let Some((ax, ay, bx, by)) = clip(ax, ay, bx, by, w, h) else {
            return Ok(());
        };

        let (dx, dy) = (bx - ax, by - ay);
        let steps = dx.abs().max(dy.abs()).ceil() as usize;
        if steps == 0 {
            let (px, py) = self.fold(ax, ay);
            visit(px, py);
            return Ok(());
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let (px, py) = self.fold(dx.mul_add(t, ax), dy.mul_add(t, ay));
            visit(px, py);
        }
        Ok(())
    }

    /// Continuous pixel coordinate → pixel index; the far edge folds into
    /// the last pixel.
    #[inline]
    fn fold(&self, px: f64, py: f64) -> (usize, usize) {
        let ix = (px.max(0.0).floor() as usize).min(self.pixel_width() - 1);
        let iy = (py.max(0.0).floor() as usize).min(self.pixel_height() - 1);
        (ix, iy)
    }

    /// Pixel → (column, row, sub-x, sub-y).
    #[inline]
    #[must_use]
    pub const fn cell_of(&self, px: usize, py: usize) -> (usize, usize, usize, usize) {
        (px / self.xres, py / self.yres, px % self.xres, py % self.yres)
    }
}

/// Liang–Barsky clip of a segment to `[0, w] × [0, h]`.
fn clip(x1: f64, y1: f64, x2: f64, y2: f64, w: f64, h: f64) -> Option<(f64, f64, f64, f64)> {
    let (dx, dy) = (x2 - x1, y2 - y1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, x1), (dx, w - x1), (-dy, y1), (dy, h - y1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    Some((
        dx.mul_add(t0, x1),
        dy.mul_add(t0, y1),
        dx.mul_add(t1, x1),
        dy.mul_add(t1, y1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scale::Scale;

    fn unit(cols: usize, rows: usize, xres: usize, yres: usize) -> Raster {
        Raster::new(
            (cols, rows),
            (xres, yres),
            (0.0, 0.0),
            (1.0, 1.0),
            (ScaleTransform::IDENTITY, ScaleTransform::IDENTITY),
        )
        .unwrap()
    }

    #[test]
    fn corners_map_to_corner_pixels() {
        let r = unit(10, 5, 2, 4);
        assert_eq!(r.point(0.0, 1.0).unwrap(), Some((0, 0)));
        assert_eq!(r.point(1.0, 0.0).unwrap(), Some((19, 19)));
        assert_eq!(r.point(1.0, 1.0).unwrap(), Some((19, 0)));
        assert_eq!(r.cell_of(19, 19), (9, 4, 1, 3));
    }

    #[test]
    fn outside_points_are_dropped() {
        let r = unit(10, 5, 2, 4);
        assert_eq!(r.point(1.01, 0.5).unwrap(), None);
        assert_eq!(r.point(0.5, -0.2).unwrap(), None);
        assert_eq!(r.point(f64::NAN, 0.5).unwrap(), None);
    }

    #[test]
    fn log_axis_rejects_non_positive_points() {
        let r = Raster::new(
            (4, 4),
            (1, 1),
            (1.0, 0.0),
            (99.0, 1.0),
            (Scale::Log10.into(), ScaleTransform::IDENTITY),
        )
        .unwrap();
        assert_eq!(r.point(10.0, 0.0).unwrap(), Some((2, 3)));
        assert!(matches!(r.point(0.0, 0.0), Err(PlotError::Domain { .. })));
    }

    #[test]
    fn horizontal_line_covers_every_pixel() {
        let r = unit(4, 1, 2, 4);
        let mut hits = Vec::new();
        r.line((0.0, 0.0), (1.0, 0.0), |x, y| hits.push((x, y))).unwrap();
        hits.dedup();
        assert_eq!(hits, (0..8).map(|x| (x, 3)).collect::<Vec<_>>());
    }

    #[test]
    fn lines_are_clipped_not_dropped() {
        let r = unit(4, 4, 1, 1);
        let mut hits = Vec::new();
        r.line((-1.0, 0.5), (2.0, 0.5), |x, y| hits.push((x, y))).unwrap();
        hits.dedup();
        assert_eq!(hits, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);

        let mut none = 0;
        r.line((-2.0, -2.0), (-1.0, 3.0), |_, _| none += 1).unwrap();
        assert_eq!(none, 0);
    }

    #[test]
    fn segments_cover_the_same_pixels_both_ways() {
        let r = unit(5, 3, 2, 4);
        let coords = [-0.7, -0.1, 0.0, 0.13, 0.5, 0.91, 1.0, 1.3, 1.77];
        let ends: Vec<(f64, f64)> = coords
            .iter()
            .flat_map(|&x| coords.iter().map(move |&y| (x, y)))
            .collect();
        let walk = |a, b| {
            let mut hits = Vec::new();
            r.line(a, b, |x, y| hits.push((x, y))).unwrap();
            hits.sort_unstable();
            hits.dedup();
            hits
        };
        for &a in &ends {
            for &b in &ends {
                assert_eq!(walk(a, b), walk(b, a), "{a:?} -> {b:?}");
            }
        }
    }

    #[test]
    fn zero_size_canvas_is_an_argument_error() {
        assert!(matches!(
            Raster::new(
                (0, 3),
                (1, 1),
                (0.0, 0.0),
                (1.0, 1.0),
                (ScaleTransform::IDENTITY, ScaleTransform::IDENTITY)
            ),
            Err(PlotError::Argument(_))
        ));
    }
}
