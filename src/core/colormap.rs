//! Interpolated colormaps: ordered RGB anchors on `[0, 1]`.

use crate::core::{
    color::{Color, Rgb},
    error::PlotError,
};

/// A piecewise-linear colormap.
///
/// Anchors are strictly increasing in position, the first sits at `0.0` and
/// the last at `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    anchors: Vec<(f64, Rgb)>,
}

/// Names accepted by [`Colormap::named`] (each also with an `_r` suffix).
pub const COLORMAP_NAMES: [&str; 8] = [
    "viridis", "inferno", "magma", "plasma", "cividis", "jet", "gray", "coolwarm",
];

const VIRIDIS: [u32; 9] = [
    0x44_0154, 0x47_2d7b, 0x3b_528b, 0x2c_728e, 0x21_918c, 0x28_ae80, 0x5e_c962, 0xad_dc30, 0xfd_e725,
];
const INFERNO: [u32; 9] = [
    0x00_0004, 0x1f_0c48, 0x55_0f6d, 0x88_226a, 0xba_3655, 0xe3_5933, 0xf9_8e09, 0xf9_cb35, 0xfc_ffa4,
];
const MAGMA: [u32; 9] = [
    0x00_0004, 0x1c_1044, 0x4f_127b, 0x81_2581, 0xb5_367a, 0xe5_5064, 0xfb_8761, 0xfe_c287, 0xfc_fdbf,
];
const PLASMA: [u32; 9] = [
    0x0d_0887, 0x4c_02a1, 0x7e_03a8, 0xa9_2395, 0xcc_4778, 0xe5_6b5d, 0xf8_9441, 0xfd_c328, 0xf0_f921,
];
const CIVIDIS: [u32; 9] = [
    0x00_224e, 0x12_3570, 0x3b_496c, 0x57_5d6d, 0x70_7173, 0x8a_8779, 0xa6_9d75, 0xc4_b56c, 0xfe_e838,
];
const JET: [u32; 9] = [
    0x00_007f, 0x00_00ff, 0x00_7fff, 0x00_ffff, 0x7f_ff7f, 0xff_ff00, 0xff_7f00, 0xff_0000, 0x7f_0000,
];
const GRAY: [u32; 2] = [0x00_0000, 0xff_ffff];
const COOLWARM: [u32; 3] = [0x3b_4cc0, 0xdd_dddd, 0xb4_0426];

impl Colormap {
    /// Build from explicit anchors.
    pub fn new(anchors: Vec<(f64, Rgb)>) -> Result<Self, PlotError> {
        let (Some(first), Some(last)) = (anchors.first(), anchors.last()) else {
            return Err(PlotError::argument("a colormap needs at least two anchors"));
        };
        if anchors.len() < 2 {
            return Err(PlotError::argument("a colormap needs at least two anchors"));
        }
        if first.0 != 0.0 || last.0 != 1.0 {
            return Err(PlotError::argument(
                "colormap anchors must start at 0 and end at 1",
            ));
        }
        if anchors.windows(2).any(|w| w[0].0.partial_cmp(&w[1].0).is_none_or(|o| o.is_ge())) {
            return Err(PlotError::argument(
                "colormap anchor positions must be strictly increasing",
            ));
        }
        Ok(Self { anchors })
    }

    /// Evenly spaced anchors from an ordered colour list.
    pub fn from_colors(colors: &[Rgb]) -> Result<Self, PlotError> {
        if colors.len() < 2 {
            return Err(PlotError::argument("a colormap needs at least two anchors"));
        }
        let last = (colors.len() - 1) as f64;
        Self::new(
            colors
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let pos = if i + 1 == colors.len() { 1.0 } else { i as f64 / last };
                    (pos, *c)
                })
                .collect(),
        )
    }

    /// Look up a built-in map; a trailing `_r` reverses it.
    pub fn named(name: &str) -> Result<Self, PlotError> {
        let key = name.trim().to_ascii_lowercase();
        let (base, reversed) = match key.strip_suffix("_r") {
            Some(b) => (b, true),
            None => (key.as_str(), false),
        };
        let table: &[u32] = match base {
            "viridis" => &VIRIDIS,
            "inferno" => &INFERNO,
            "magma" => &MAGMA,
            "plasma" => &PLASMA,
            "cividis" => &CIVIDIS,
            "jet" => &JET,
            "gray" | "grey" => &GRAY,
            "coolwarm" => &COOLWARM,
            _ => return Err(PlotError::argument(format!("unknown colormap `{name}`"))),
        };
        let colors: Vec<Rgb> = table.iter().map(|v| Rgb::hex(*v)).collect();
        let map = Self::from_colors(&colors)?;
        Ok(if reversed { map.reversed() } else { map })
    }

    #[inline]
    #[must_use]
    pub fn anchors(&self) -> &[(f64, Rgb)] {
        &self.anchors
    }

    /// Same positions, colours in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let positions = self.anchors.iter().map(|a| a.0);
        let colors = self.anchors.iter().rev().map(|a| a.1);
        Self {
            anchors: positions.zip(colors).collect(),
        }
    }

    /// Colour at `fraction` (clamped to `[0, 1]`; NaN reads as 0).
    #[must_use]
    pub fn sample(&self, fraction: f64) -> Rgb {
        let t = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let hi = self
            .anchors
            .iter()
            .position(|a| a.0 >= t)
            .unwrap_or(self.anchors.len() - 1);
        if hi == 0 {
            return self.anchors[0].1;
        }
        let (p0, c0) = self.anchors[hi - 1];
        let (p1, c1) = self.anchors[hi];
        let w = (t - p0) / (p1 - p0);
        let lerp = |a: u8, b: u8| {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * w;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2))
    }

    /// Normalise `value` against `(lo, hi)` and sample.  A zero-width range
    /// samples the middle of the map.
    #[must_use]
    pub fn quantize(&self, value: f64, (lo, hi): (f64, f64)) -> Color {
        let span = hi - lo;
        let t = if span == 0.0 || !span.is_finite() {
            0.5
        } else {
            (value - lo) / span
        };
        Color::Rgb(self.sample(t))
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::from_colors(&VIRIDIS.map(Rgb::hex)).unwrap_or_else(|_| Self {
            anchors: vec![(0.0, Rgb(0, 0, 0)), (1.0, Rgb(255, 255, 255))],
        })
    }
}
