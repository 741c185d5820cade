//! Box-and-whisker canvas.  Each series owns three rows:
//!
//! ```text
//!   ╷  ┌───┬──┐     ╷
//!   ├──┤   │  ├─────┤
//!   ╵  └───┴──┘     ╵
//! ```

use tracing::debug;

use crate::{
    core::{
        color::Color,
        error::PlotError,
        scale::{AxisMap, ScaleTransform},
    },
    render::canvas::push_cells,
};

/// Rows drawn per series.
pub const ROWS_PER_SERIES: usize = 3;

/// Minimum, lower quartile, median, upper quartile and maximum of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumber {
    pub fn new(min: f64, q1: f64, median: f64, q3: f64, max: f64) -> Result<Self, PlotError> {
        let s = Self {
            min,
            q1,
            median,
            q3,
            max,
        };
        let v = s.as_array();
        if v.iter().any(|x| !x.is_finite()) || v.windows(2).any(|w| w[0] > w[1]) {
            return Err(PlotError::argument(format!(
                "box statistics must be finite and ordered, got {v:?}"
            )));
        }
        Ok(s)
    }

    /// Summary of raw data using linearly interpolated quantiles.  Non-finite
    /// samples are ignored; `None` when nothing finite is left.
    #[must_use]
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let mut v: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if v.is_empty() {
            return None;
        }
        v.sort_by(f64::total_cmp);
        let q = |p: f64| {
            let h = (v.len() - 1) as f64 * p;
            let lo = h.floor() as usize;
            let hi = h.ceil() as usize;
            (v[hi] - v[lo]).mul_add(h - h.floor(), v[lo])
        };
        Some(Self {
            min: v[0],
            q1: q(0.25),
            median: q(0.5),
            q3: q(0.75),
            max: v[v.len() - 1],
        })
    }

    const fn as_array(&self) -> [f64; 5] {
        [self.min, self.q1, self.median, self.q3, self.max]
    }
}

#[derive(Clone, Copy, Debug)]
struct Series {
    stats: FiveNumber,
    color: Color,
}

#[derive(Clone, Debug)]
pub struct BoxCanvas {
    width: usize,
    x: AxisMap,
    series: Vec<Series>,
}

impl BoxCanvas {
    /// `origin`/`extent` span the shared value axis in data space.
    pub fn new(
        width: usize,
        origin: f64,
        extent: f64,
        transform: ScaleTransform,
    ) -> Result<Self, PlotError> {
        if width == 0 {
            return Err(PlotError::argument("box canvas must be at least 1 column wide"));
        }
        Ok(Self {
            width,
            x: AxisMap::new(origin, extent, transform)?,
            series: Vec::new(),
        })
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.series.len() * ROWS_PER_SERIES
    }

    /// Data-space `(lo, hi)` of the value axis.
    #[must_use]
    pub fn xrange(&self) -> (f64, f64) {
        (self.x.value_at(0.0), self.x.value_at(1.0))
    }

    #[must_use]
    pub fn stats(&self, series: usize) -> Option<FiveNumber> {
        self.series.get(series).map(|s| s.stats)
    }

    pub fn add_series(&mut self, stats: FiveNumber, color: Color) -> Result<(), PlotError> {
        for v in stats.as_array() {
            self.x.fraction(v)?;
        }
        self.series.push(Series { stats, color });
        debug!(series = self.series.len() - 1, ?stats, "box series added");
        Ok(())
    }

    pub fn check_point(&self, x: f64) -> Result<(), PlotError> {
        if x.is_finite() {
            self.x.fraction(x)?;
        }
        Ok(())
    }

    /// Stretch the whiskers of series `round(y)` so they reach `x`.
    pub fn point(&mut self, x: f64, y: f64, color: Color) -> Result<(), PlotError> {
        self.check_point(x)?;
        if !x.is_finite() || !y.is_finite() {
            return Ok(());
        }
        let idx = y.round();
        if idx < 0.0 || idx >= self.series.len() as f64 {
            return Ok(());
        }
        let s = &mut self.series[idx as usize];
        s.stats.min = s.stats.min.min(x);
        s.stats.max = s.stats.max.max(x);
        s.color = color;
        Ok(())
    }

    pub fn line(&mut self, a: (f64, f64), b: (f64, f64), color: Color) -> Result<(), PlotError> {
        self.check_point(a.0)?;
        self.check_point(b.0)?;
        self.point(a.0, a.1, color)?;
        self.point(b.0, b.1, color)
    }

    fn column(&self, v: f64) -> usize {
        let last = self.width - 1;
        let f = self.x.fraction(v).unwrap_or(0.0);
        let c = (f * last as f64).round();
        if c.is_nan() || c < 0.0 {
            0
        } else {
            (c as usize).min(last)
        }
    }

    /// Columns of the outer whisker ends, box edges and median, left to
    /// right.  A flipped axis puts `max` on the left.
    fn columns(&self, stats: FiveNumber) -> [usize; 5] {
        let mut cols = stats.as_array().map(|v| self.column(v));
        if cols[0] > cols[4] {
            cols.reverse();
        }
        cols
    }

    pub fn push_row(&self, buf: &mut String, row: usize, color: bool) {
        let s = self.series[row / ROWS_PER_SERIES];
        let [lw, lq, med, rq, rw] = self.columns(s.stats);

        let mut glyphs = vec![' '; self.width];
        let mut fill = |from: usize, to: usize, ch: char| {
            for g in glyphs.iter_mut().take(to).skip(from + 1) {
                *g = ch;
            }
        };
        match row % ROWS_PER_SERIES {
            0 => {
                fill(lq, rq, '─');
                glyphs[lw] = '╷';
                glyphs[rw] = '╷';
                glyphs[lq] = '┌';
                glyphs[rq] = '┐';
                glyphs[med] = '┬';
            }
            1 => {
                fill(lw, lq, '─');
                fill(rq, rw, '─');
                glyphs[lw] = '├';
                glyphs[rw] = '┤';
                glyphs[lq] = '┤';
                glyphs[rq] = '├';
                glyphs[med] = '│';
            }
            _ => {
                fill(lq, rq, '─');
                glyphs[lw] = '╵';
                glyphs[rw] = '╵';
                glyphs[lq] = '└';
                glyphs[rq] = '┘';
                glyphs[med] = '┴';
            }
        }

        push_cells(
            buf,
            glyphs.into_iter().enumerate().map(|(i, ch)| {
                let c = if (lw..=rw).contains(&i) {
                    s.color
                } else {
                    Color::Normal
                };
                (ch, c)
            }),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(c: &BoxCanvas) -> Vec<String> {
        (0..c.rows())
            .map(|r| {
                let mut s = String::new();
                c.push_row(&mut s, r, false);
                s
            })
            .collect()
    }

    #[test]
    fn draws_whiskers_box_and_median() {
        let mut c = BoxCanvas::new(11, 0.0, 10.0, ScaleTransform::IDENTITY).unwrap();
        c.add_series(FiveNumber::new(0.0, 2.0, 5.0, 7.0, 10.0).unwrap(), Color::Normal)
            .unwrap();
        assert_eq!(
            rows(&c),
            vec![
                "╷ ┌──┬─┐  ╷",
                "├─┤  │ ├──┤",
                "╵ └──┴─┘  ╵",
            ]
        );
    }

    #[test]
    fn flipped_axis_mirrors_the_box() {
        let mut c = BoxCanvas::new(11, 10.0, -10.0, ScaleTransform::IDENTITY).unwrap();
        c.add_series(
            FiveNumber::new(0.0, 2.0, 5.0, 7.0, 10.0).unwrap(),
            Color::Indexed(9),
        )
        .unwrap();
        assert_eq!(
            rows(&c),
            vec![
                "╷  ┌─┬──┐ ╷",
                "├──┤ │  ├─┤",
                "╵  └─┴──┘ ╵",
            ]
        );
        let mut colored = String::new();
        c.push_row(&mut colored, 1, true);
        assert!(colored.starts_with("\x1b[38;5;9m├"), "{colored:?}");
    }

    #[test]
    fn unordered_statistics_are_rejected() {
        assert!(FiveNumber::new(0.0, 3.0, 2.0, 4.0, 5.0).is_err());
        assert!(FiveNumber::new(0.0, 1.0, f64::NAN, 4.0, 5.0).is_err());
    }

    #[test]
    fn quartiles_interpolate() {
        let s = FiveNumber::from_data(&[4.0, 1.0, 3.0, 2.0, 5.0, f64::NAN]).unwrap();
        assert_eq!(s, FiveNumber::new(1.0, 2.0, 3.0, 4.0, 5.0).unwrap());
        let s = FiveNumber::from_data(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert!(FiveNumber::from_data(&[]).is_none());
    }

    #[test]
    fn points_extend_whiskers() {
        let mut c = BoxCanvas::new(11, 0.0, 10.0, ScaleTransform::IDENTITY).unwrap();
        c.add_series(FiveNumber::new(3.0, 4.0, 5.0, 6.0, 7.0).unwrap(), Color::Normal)
            .unwrap();
        c.point(1.0, 0.0, Color::Normal).unwrap();
        c.point(9.0, 4.0, Color::Normal).unwrap();
        assert_eq!(c.stats(0).map(|s| s.min), Some(1.0));
        assert_eq!(c.stats(0).map(|s| s.max), Some(7.0));
    }
}
