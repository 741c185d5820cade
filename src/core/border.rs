//! Named border styles and their glyph sets.

use std::str::FromStr;

use crate::core::error::PlotError;

/// The eight glyphs framing a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub tl: char,
    pub tr: char,
    pub bl: char,
    pub br: char,
    pub t: char,
    pub b: char,
    pub l: char,
    pub r: char,
}

impl BorderGlyphs {
    const fn new(corners: [char; 4], edges: [char; 4]) -> Self {
        Self {
            tl: corners[0],
            tr: corners[1],
            bl: corners[2],
            br: corners[3],
            t: edges[0],
            b: edges[1],
            l: edges[2],
            r: edges[3],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    #[default]
    Solid,
    Bold,
    Dashed,
    Dotted,
    Ascii,
    Rounded,
    Corners,
    Barplot,
    /// Nothing is drawn, but the border columns and lines are still laid out.
    None,
}

impl BorderStyle {
    pub const ALL: [Self; 9] = [
        Self::Solid,
        Self::Bold,
        Self::Dashed,
        Self::Dotted,
        Self::Ascii,
        Self::Rounded,
        Self::Corners,
        Self::Barplot,
        Self::None,
    ];

    #[must_use]
    pub const fn glyphs(self) -> BorderGlyphs {
        match self {
            Self::Solid => BorderGlyphs::new(['┌', '┐', '└', '┘'], ['─', '─', '│', '│']),
            Self::Bold => BorderGlyphs::new(['┏', '┓', '┗', '┛'], ['━', '━', '┃', '┃']),
            Self::Dashed => BorderGlyphs::new(['┌', '┐', '└', '┘'], ['╌', '╌', '┊', '┊']),
            Self::Dotted => BorderGlyphs::new(['⡤', '⢤', '⠓', '⠚'], ['⠤', '⠒', '⡇', '⢸']),
            Self::Ascii => BorderGlyphs::new(['+', '+', '+', '+'], ['-', '-', '|', '|']),
            Self::Rounded => BorderGlyphs::new(['╭', '╮', '╰', '╯'], ['─', '─', '│', '│']),
            Self::Corners => BorderGlyphs::new(['┌', '┐', '└', '┘'], [' ', ' ', ' ', ' ']),
            Self::Barplot => BorderGlyphs::new(['┐', ' ', '┘', ' '], [' ', ' ', '┤', ' ']),
            Self::None => BorderGlyphs::new([' ', ' ', ' ', ' '], [' ', ' ', ' ', ' ']),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Bold => "bold",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Ascii => "ascii",
            Self::Rounded => "rounded",
            Self::Corners => "corners",
            Self::Barplot => "barplot",
            Self::None => "none",
        }
    }
}

impl FromStr for BorderStyle {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().trim_start_matches(':').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.name() == key)
            .ok_or_else(|| PlotError::argument(format!("unknown border style `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_style_by_name() {
        for style in BorderStyle::ALL {
            assert_eq!(style.name().parse::<BorderStyle>().unwrap(), style);
        }
        assert_eq!(":Bold".parse::<BorderStyle>().unwrap(), BorderStyle::Bold);
        assert!(matches!(
            "wavy".parse::<BorderStyle>(),
            Err(PlotError::Argument(_))
        ));
    }

    #[test]
    fn none_is_all_blank() {
        let g = BorderStyle::None.glyphs();
        assert!([g.tl, g.tr, g.bl, g.br, g.t, g.b, g.l, g.r].iter().all(|c| *c == ' '));
    }
}
