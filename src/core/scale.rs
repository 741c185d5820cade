//! Axis scales: data value ⇄ plot space.
//!
//! A [`ScaleTransform`] subtracts an additive offset and then applies the
//! scale function.  [`AxisMap`] goes one step further and maps a value to
//! its fraction of a plot-space interval, which is what the canvases use to
//! pick pixels.

use std::str::FromStr;

use crate::core::error::PlotError;

/// Scale function applied after the offset is removed.
#[derive(Clone, Copy, Debug)]
pub enum Scale {
    Identity,
    Ln,
    Log2,
    Log10,
    /// Caller-supplied monotone function with its inverse.  The pair is
    /// trusted; nothing checks that they actually invert each other.
    Custom {
        name: &'static str,
        forward: fn(f64) -> f64,
        inverse: fn(f64) -> f64,
    },
}

impl Scale {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Ln => "ln",
            Self::Log2 => "log2",
            Self::Log10 => "log10",
            Self::Custom { name, .. } => *name,
        }
    }

    #[inline]
    const fn is_log(&self) -> bool {
        matches!(self, Self::Ln | Self::Log2 | Self::Log10)
    }
}

impl FromStr for Scale {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" | "linear" => Ok(Self::Identity),
            "ln" => Ok(Self::Ln),
            "log2" => Ok(Self::Log2),
            "log10" | "log" => Ok(Self::Log10),
            other => Err(PlotError::argument(format!("unknown scale `{other}`"))),
        }
    }
}

/// `forward(v) = scale(v - offset)`, `inverse(p) = scale⁻¹(p) + offset`.
#[derive(Clone, Copy, Debug)]
pub struct ScaleTransform {
    pub scale: Scale,
    pub offset: f64,
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Scale> for ScaleTransform {
    #[inline]
    fn from(scale: Scale) -> Self {
        Self::new(scale, 0.0)
    }
}

impl ScaleTransform {
    pub const IDENTITY: Self = Self::new(Scale::Identity, 0.0);

    #[inline]
    #[must_use]
    pub const fn new(scale: Scale, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// Map a data value into plot space.
    ///
    /// Logarithmic scales reject values that are not positive once the offset
    /// is removed; any scale that turns a finite input into a non-finite
    /// output is also a domain error.
    pub fn forward(&self, value: f64) -> Result<f64, PlotError> {
        let u = value - self.offset;
        let domain = || PlotError::Domain {
            value,
            scale: self.scale.name(),
        };
        if self.scale.is_log() && u.is_finite() && u <= 0.0 {
            return Err(domain());
        }
        let out = match self.scale {
            Scale::Identity => u,
            Scale::Ln => u.ln(),
            Scale::Log2 => u.log2(),
            Scale::Log10 => u.log10(),
            Scale::Custom { forward, .. } => forward(u),
        };
        if u.is_finite() && !out.is_finite() {
            return Err(domain());
        }
        Ok(out)
    }

    /// Map a plot-space coordinate back to a data value.
    #[must_use]
    pub fn inverse(&self, p: f64) -> f64 {
        let u = match self.scale {
            Scale::Identity => p,
            Scale::Ln => p.exp(),
            Scale::Log2 => p.exp2(),
            Scale::Log10 => 10f64.powf(p),
            Scale::Custom { inverse, .. } => inverse(p),
        };
        u + self.offset
    }
}

/// One axis of a canvas: a data interval resolved into plot space.
#[derive(Clone, Copy, Debug)]
pub struct AxisMap {
    transform: ScaleTransform,
    lo: f64,
    span: f64,
}

impl AxisMap {
    /// `origin` and `extent` are in data space; a negative extent flips the
    /// axis.  A zero-width interval is treated as a unit range starting at
    /// `origin` so nothing downstream divides by zero.
    pub fn new(origin: f64, extent: f64, transform: ScaleTransform) -> Result<Self, PlotError> {
        if !origin.is_finite() || !extent.is_finite() {
            return Err(PlotError::argument(format!(
                "axis range must be finite (origin {origin}, extent {extent})"
            )));
        }
        let lo = transform.forward(origin)?;
        let hi = transform.forward(origin + extent)?;
        let span = if hi == lo { 1.0 } else { hi - lo };
        Ok(Self { transform, lo, span })
    }

    /// Fraction of the axis covered at `value`; `0` at the origin, `1` at the
    /// far end.  Values outside the interval give fractions outside `[0, 1]`.
    #[inline]
    pub fn fraction(&self, value: f64) -> Result<f64, PlotError> {
        Ok((self.transform.forward(value)? - self.lo) / self.span)
    }

    /// Data value sitting at `fraction` of the axis.
    #[inline]
    #[must_use]
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.transform.inverse(self.lo + fraction * self.span)
    }

    #[inline]
    #[must_use]
    pub const fn transform(&self) -> ScaleTransform {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identity_passes_through_with_offset() {
        let t = ScaleTransform::new(Scale::Identity, 2.0);
        assert_eq!(t.forward(5.0).unwrap(), 3.0);
        assert_eq!(t.inverse(3.0), 5.0);
        assert_eq!(t.forward(-7.0).unwrap(), -9.0);
    }

    #[test]
    fn log_scales_reject_non_positive_values() {
        let t = ScaleTransform::from(Scale::Log10);
        assert!(matches!(
            t.forward(0.0),
            Err(PlotError::Domain { scale: "log10", .. })
        ));
        assert!(t.forward(-1.0).is_err());
        let shifted = ScaleTransform::new(Scale::Ln, 1.0);
        assert!(shifted.forward(1.0).is_err());
        assert!(shifted.forward(1.5).is_ok());
    }

    #[test]
    fn inverse_undoes_forward() {
        for scale in [Scale::Identity, Scale::Ln, Scale::Log2, Scale::Log10] {
            let t = ScaleTransform::new(scale, -0.5);
            for v in [0.25, 1.0, 3.0, 1000.0] {
                assert!(close(t.inverse(t.forward(v).unwrap()), v), "{}", scale.name());
            }
        }
    }

    #[test]
    fn custom_scale_flags_non_finite_results() {
        let sqrt = Scale::Custom {
            name: "sqrt",
            forward: f64::sqrt,
            inverse: |p| p * p,
        };
        let t = ScaleTransform::from(sqrt);
        assert_eq!(t.forward(9.0).unwrap(), 3.0);
        assert!(matches!(
            t.forward(-4.0),
            Err(PlotError::Domain { scale: "sqrt", .. })
        ));
    }

    #[test]
    fn scale_names_parse() {
        assert!(matches!("log10".parse::<Scale>(), Ok(Scale::Log10)));
        assert!(matches!("Identity".parse::<Scale>(), Ok(Scale::Identity)));
        assert!(matches!("cubic".parse::<Scale>(), Err(PlotError::Argument(_))));
    }

    #[test]
    fn axis_map_fractions() {
        let axis = AxisMap::new(0.0, 10.0, ScaleTransform::IDENTITY).unwrap();
        assert!(close(axis.fraction(2.5).unwrap(), 0.25));
        assert!(close(axis.value_at(0.5), 5.0));

        let log = AxisMap::new(1.0, 99.0, Scale::Log10.into()).unwrap();
        assert!(close(log.fraction(10.0).unwrap(), 0.5));
    }

    #[test]
    fn axis_map_flips_and_survives_zero_width() {
        let flipped = AxisMap::new(10.0, -10.0, ScaleTransform::IDENTITY).unwrap();
        assert!(close(flipped.fraction(10.0).unwrap(), 0.0));
        assert!(close(flipped.fraction(0.0).unwrap(), 1.0));

        let flat = AxisMap::new(3.0, 0.0, ScaleTransform::IDENTITY).unwrap();
        assert!(close(flat.fraction(3.0).unwrap(), 0.0));
        assert!(close(flat.fraction(3.5).unwrap(), 0.5));
    }

    #[test]
    fn axis_map_rejects_log_origin_at_zero() {
        assert!(AxisMap::new(0.0, 1.0, Scale::Log10.into()).is_err());
    }
}
