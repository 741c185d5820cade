//! Geometry helpers: axis limits + terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::core::{
    constants::{AUTO_PAD_FRACTION, MIN_AUTO_PAD, MIN_CANVAS_HEIGHT, MIN_CANVAS_WIDTH},
    error::PlotError,
};

/// Explicit axis limits.  `(0, 0)` means "derive from the data".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Limits {
    pub lo: f64,
    pub hi: f64,
}

impl Limits {
    pub const AUTO: Self = Self { lo: 0.0, hi: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    #[inline]
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.lo == 0.0 && self.hi == 0.0
    }
}

impl TryFrom<&[f64]> for Limits {
    type Error = PlotError;

    fn try_from(v: &[f64]) -> Result<Self, Self::Error> {
        match v {
            [] => Ok(Self::AUTO),
            [lo, hi] if lo.is_finite() && hi.is_finite() => Ok(Self::new(*lo, *hi)),
            [lo, hi] => Err(PlotError::argument(format!(
                "limits must be finite, got [{lo}, {hi}]"
            ))),
            _ => Err(PlotError::argument(format!(
                "limits must have exactly 2 elements, got {}",
                v.len()
            ))),
        }
    }
}

/// Axis range for `data`, honouring explicit `limits`.
///
/// * Explicit limits are returned verbatim, even inverted or zero-width.
/// * Auto limits are the finite extrema of `data`; an empty (or all
///   non-finite) series gives `(0.0, 1.0)`.
/// * A flat auto range is widened by a fraction of its magnitude, or by an
///   absolute half unit when that fraction would vanish (e.g. all zeros).
#[must_use]
pub fn extend_limits(data: &[f64], limits: Limits) -> (f64, f64) {
    if !limits.is_auto() {
        return (limits.lo, limits.hi);
    }

    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in data.iter().copied().filter(|v| v.is_finite()) {
        low = low.min(v);
        high = high.max(v);
    }

    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }

    if low == high {
        let pad = low.abs() * AUTO_PAD_FRACTION;
        if low - pad < low && low + pad > low {
            return (low - pad, low + pad);
        }
        return (low - MIN_AUTO_PAD, high + MIN_AUTO_PAD);
    }

    (low, high)
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Canvas size that fits the terminal once `reserved_cols`/`reserved_rows`
/// are set aside for labels and chrome.
#[inline]
#[must_use]
pub fn canvas_dims((w, h): (Width, Height), reserved_cols: usize, reserved_rows: usize) -> (usize, usize) {
    let cols = usize::from(w.0).saturating_sub(reserved_cols);
    let rows = usize::from(h.0).saturating_sub(reserved_rows);
    (cols.max(MIN_CANVAS_WIDTH), rows.max(MIN_CANVAS_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_limits_are_tight() {
        assert_eq!(extend_limits(&[3.0, -1.0, 2.0], Limits::AUTO), (-1.0, 3.0));
        assert_eq!(
            extend_limits(&[f64::NAN, 1.0, 4.0, f64::INFINITY], Limits::AUTO),
            (1.0, 4.0)
        );
        assert_eq!(extend_limits(&[], Limits::AUTO), (0.0, 1.0));
    }

    #[test]
    fn constant_data_never_collapses() {
        for v in [0.0, 1.0, -250.0, 1e-300, 1e300, 5e-324] {
            let (lo, hi) = extend_limits(&[v, v, v], Limits::AUTO);
            assert!(lo < hi, "{v}: {lo} {hi}");
            assert!(lo <= v && v <= hi);
        }
        assert_eq!(extend_limits(&[0.0], Limits::AUTO), (-0.5, 0.5));
    }

    #[test]
    fn explicit_limits_are_verbatim() {
        assert_eq!(extend_limits(&[1.0, 2.0], Limits::new(0.0, 10.0)), (0.0, 10.0));
        assert_eq!(extend_limits(&[1.0], Limits::new(5.0, -5.0)), (5.0, -5.0));
        assert_eq!(extend_limits(&[1.0], Limits::new(2.0, 2.0)), (2.0, 2.0));
    }

    #[test]
    fn limits_from_slice() {
        assert_eq!(Limits::try_from(&[1.0, 2.0][..]).unwrap(), Limits::new(1.0, 2.0));
        assert!(Limits::try_from(&[][..]).unwrap().is_auto());
        assert!(matches!(
            Limits::try_from(&[1.0, 2.0, 3.0][..]),
            Err(PlotError::Argument(_))
        ));
        assert!(Limits::try_from(&[f64::NAN, 1.0][..]).is_err());
    }

    #[test]
    fn canvas_dims_respect_minimums() {
        assert_eq!(canvas_dims((Width(100), Height(40)), 20, 8), (80, 32));
        assert_eq!(
            canvas_dims((Width(3), Height(3)), 20, 8),
            (MIN_CANVAS_WIDTH, MIN_CANVAS_HEIGHT)
        );
    }
}
