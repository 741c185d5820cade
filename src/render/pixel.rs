//! Bitmask canvases: every character cell is a small grid of on/off dots.
//!
//! ### Braille
//! Each cell is 2×4 dots and the glyph is `U+2800 + mask`, with the dot bits
//! laid out the way Unicode numbers them:
//!
//! ```text
//!   0x01 0x08
//!   0x02 0x10
//!   0x04 0x20
//!   0x40 0x80
//! ```
//!
//! ### Block / Ascii
//! 2×2 dots per cell (TL = 1, TR = 2, BL = 4, BR = 8) looked up in a fixed
//! 16-entry table of quadrant glyphs or ASCII look-alikes.
//!
//! In every kind the glyph is a pure function of the mask; an empty cell is a
//! plain space.

use std::str::FromStr;

use crate::{
    core::{
        color::Color,
        constants::{BRAILLE_HORIZONTAL_RESOLUTION, BRAILLE_VERTICAL_RESOLUTION},
        error::PlotError,
        scale::ScaleTransform,
    },
    render::{canvas::push_cells, raster::Raster},
};

/// Dot bit for `[sub_y][sub_x]` inside a braille cell.
const BRAILLE_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

const QUAD_BITS: [[u8; 2]; 2] = [[0x1, 0x2], [0x4, 0x8]];

const BLOCK_GLYPHS: [char; 16] = [
    ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
];

const ASCII_GLYPHS: [char; 16] = [
    ' ', '`', '\'', '"', ',', '|', '/', 'r', '.', '\\', '|', '7', '_', 'L', 'J', '#',
];

/// Glyph strategy of a [`PixelCanvas`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelKind {
    #[default]
    Braille,
    Block,
    Ascii,
}

impl PixelKind {
    /// Dots per cell, `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn resolution(self) -> (usize, usize) {
        match self {
            Self::Braille => (BRAILLE_HORIZONTAL_RESOLUTION, BRAILLE_VERTICAL_RESOLUTION),
            Self::Block | Self::Ascii => (2, 2),
        }
    }

    #[inline]
    const fn bit(self, sub_x: usize, sub_y: usize) -> u8 {
        match self {
            Self::Braille => BRAILLE_BITS[sub_y][sub_x],
            Self::Block | Self::Ascii => QUAD_BITS[sub_y][sub_x],
        }
    }

    /// Glyph for a coverage mask.
    #[must_use]
    pub fn glyph(self, mask: u8) -> char {
        if mask == 0 {
            return ' ';
        }
        match self {
            Self::Braille => char::from_u32(0x2800 | u32::from(mask)).unwrap_or(' '),
            Self::Block => BLOCK_GLYPHS[usize::from(mask & 0x0F)],
            Self::Ascii => ASCII_GLYPHS[usize::from(mask & 0x0F)],
        }
    }
}

impl FromStr for PixelKind {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "braille" => Ok(Self::Braille),
            "block" => Ok(Self::Block),
            "ascii" => Ok(Self::Ascii),
            other => Err(PlotError::argument(format!("unknown canvas kind `{other}`"))),
        }
    }
}

/// Character grid where each cell unions the dots drawn into it.
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    kind: PixelKind,
    raster: Raster,
    masks: Vec<u8>,
    colors: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(
        kind: PixelKind,
        (width, height): (usize, usize),
        origin: (f64, f64),
        extent: (f64, f64),
        scales: (ScaleTransform, ScaleTransform),
    ) -> Result<Self, PlotError> {
        let raster = Raster::new((width, height), kind.resolution(), origin, extent, scales)?;
        Ok(Self {
            kind,
            raster,
            masks: vec![0; width * height],
            colors: vec![Color::Normal; width * height],
        })
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> PixelKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub const fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Coverage mask of cell `(col, row)`.
    #[inline]
    #[must_use]
    pub fn mask(&self, col: usize, row: usize) -> u8 {
        self.masks[row * self.raster.cols() + col]
    }

    /// Switch on one dot, addressed in pixel coordinates.
    pub fn set_pixel(&mut self, px: usize, py: usize, color: Color) {
        if px >= self.raster.pixel_width() || py >= self.raster.pixel_height() {
            return;
        }
        let (col, row, sx, sy) = self.raster.cell_of(px, py);
        let i = row * self.raster.cols() + col;
        self.masks[i] |= self.kind.bit(sx, sy);
        self.colors[i] = color;
    }

    pub fn point(&mut self, x: f64, y: f64, color: Color) -> Result<(), PlotError> {
        if let Some((px, py)) = self.raster.point(x, y)? {
            self.set_pixel(px, py, color);
        }
        Ok(())
    }

    pub fn line(&mut self, a: (f64, f64), b: (f64, f64), color: Color) -> Result<(), PlotError> {
        let raster = self.raster;
        raster.line(a, b, |px, py| self.set_pixel(px, py, color))
    }

    pub fn push_row(&self, buf: &mut String, row: usize, color: bool) {
        let cols = self.raster.cols();
        let base = row * cols;
        push_cells(
            buf,
            (base..base + cols).map(|i| (self.kind.glyph(self.masks[i]), self.colors[i])),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::NamedColor;

    fn canvas(kind: PixelKind, w: usize, h: usize) -> PixelCanvas {
        PixelCanvas::new(
            kind,
            (w, h),
            (0.0, 0.0),
            (1.0, 1.0),
            (ScaleTransform::IDENTITY, ScaleTransform::IDENTITY),
        )
        .unwrap()
    }

    fn rows(c: &PixelCanvas) -> Vec<String> {
        (0..c.raster().rows())
            .map(|r| {
                let mut s = String::new();
                c.push_row(&mut s, r, false);
                s
            })
            .collect()
    }

    #[test]
    fn braille_table_matches_unicode() {
        assert_eq!(PixelKind::Braille.glyph(0x01), '⠁');
        assert_eq!(PixelKind::Braille.glyph(0x47), '⡇');
        assert_eq!(PixelKind::Braille.glyph(0xB8), '⢸');
        assert_eq!(PixelKind::Braille.glyph(0xFF), '⣿');
        assert_eq!(PixelKind::Braille.glyph(0), ' ');
    }

    #[test]
    fn single_point_sets_top_left_dot() {
        let mut c = canvas(PixelKind::Braille, 10, 5);
        c.point(0.0, 1.0, Color::Normal).unwrap();
        assert_eq!(c.mask(0, 0), 0x01);
        let filled: usize = c.masks.iter().filter(|m| **m != 0).count();
        assert_eq!(filled, 1);
        assert_eq!(rows(&c)[0], format!("⠁{}", " ".repeat(9)));
    }

    #[test]
    fn max_edge_lands_in_last_cell() {
        let mut c = canvas(PixelKind::Braille, 10, 5);
        c.point(1.0, 0.0, Color::Normal).unwrap();
        assert_eq!(c.mask(9, 4), 0x80);
    }

    #[test]
    fn masks_union_across_writes() {
        let mut c = canvas(PixelKind::Block, 1, 1);
        c.point(0.0, 1.0, Color::Normal).unwrap();
        c.point(1.0, 1.0, Color::Normal).unwrap();
        assert_eq!(rows(&c), vec!["▀"]);
        c.point(0.0, 0.0, Color::Normal).unwrap();
        c.point(1.0, 0.0, Color::Normal).unwrap();
        assert_eq!(rows(&c), vec!["█"]);
    }

    #[test]
    fn ascii_vertical_and_horizontal_strokes() {
        let mut c = canvas(PixelKind::Ascii, 2, 2);
        c.line((0.0, 0.0), (0.0, 1.0), Color::Normal).unwrap();
        assert_eq!(rows(&c), vec!["| ", "| "]);
        c.line((0.5, 0.0), (1.0, 0.0), Color::Normal).unwrap();
        assert_eq!(rows(&c), vec!["| ", "|_"]);
    }

    #[test]
    fn colored_rows_strip_to_plain_rows() {
        let mut c = canvas(PixelKind::Braille, 4, 2);
        c.line((0.0, 0.0), (1.0, 1.0), Color::Named(NamedColor::Red))
            .unwrap();
        let mut colored = String::new();
        c.push_row(&mut colored, 0, true);
        assert!(colored.contains("\x1b[31m"));
        assert_eq!(crate::core::text::strip(&colored), rows(&c)[0]);
    }

    #[test]
    fn kind_names_parse() {
        assert_eq!("Block".parse::<PixelKind>().unwrap(), PixelKind::Block);
        assert!("pixels".parse::<PixelKind>().is_err());
    }
}
