//! Terminal colours: symbolic names, palette indices and 24-bit RGB, plus the
//! zero-alloc escape sequences that render them.

use std::{fmt, str};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("unknown color `{0}`")]
    UnknownColor(String),
    #[error("{channel} value {value} is outside 0..=255")]
    Value { channel: &'static str, value: i64 },
    #[error("invalid hex colour digit")]
    InvalidHexDigit,
    #[error("hex colour must be exactly 6 digits")]
    InvalidHexLength,
}

/// A 24-bit sRGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(ColorError::InvalidHexLength);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit);
        Ok(Self(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    /// `const` hex literal helper for the built-in tables.
    pub(crate) const fn hex(v: u32) -> Self {
        Self((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
}

/// The sixteen classic SGR colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    LightBlack,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    LightWhite,
}

impl NamedColor {
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::LightBlack,
        Self::LightRed,
        Self::LightGreen,
        Self::LightYellow,
        Self::LightBlue,
        Self::LightMagenta,
        Self::LightCyan,
        Self::LightWhite,
    ];

    /// Position in the 16-colour palette (0..=15).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::LightBlack => "light_black",
            Self::LightRed => "light_red",
            Self::LightGreen => "light_green",
            Self::LightYellow => "light_yellow",
            Self::LightBlue => "light_blue",
            Self::LightMagenta => "light_magenta",
            Self::LightCyan => "light_cyan",
            Self::LightWhite => "light_white",
        }
    }
}

/// xterm defaults for the first sixteen palette entries.
const BASE16: [Rgb; 16] = [
    Rgb(0, 0, 0),
    Rgb(205, 0, 0),
    Rgb(0, 205, 0),
    Rgb(205, 205, 0),
    Rgb(0, 0, 238),
    Rgb(205, 0, 205),
    Rgb(0, 205, 205),
    Rgb(229, 229, 229),
    Rgb(127, 127, 127),
    Rgb(255, 0, 0),
    Rgb(0, 255, 0),
    Rgb(255, 255, 0),
    Rgb(92, 92, 255),
    Rgb(255, 0, 255),
    Rgb(0, 255, 255),
    Rgb(255, 255, 255),
];

const CUBE_STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Anything a cell, label or border can be painted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Terminal default; renders without any escape sequence.
    #[default]
    Normal,
    Named(NamedColor),
    /// 256-colour palette entry.
    Indexed(u8),
    Rgb(Rgb),
}

/// Colours handed out to successive unstyled series.
pub const SERIES_CYCLE: [Color; 6] = [
    Color::Named(NamedColor::Green),
    Color::Named(NamedColor::Blue),
    Color::Named(NamedColor::Red),
    Color::Named(NamedColor::Magenta),
    Color::Named(NamedColor::Yellow),
    Color::Named(NamedColor::Cyan),
];

/// Default colour of borders, decorations and row labels.
pub const BORDER_COLOR: Color = Color::Named(NamedColor::LightBlack);

impl Color {
    /// Resolve a colour name, `#rrggbb` or a palette index `0..=255`.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        if key.starts_with('#') {
            return Rgb::from_hex(&key).map(Self::Rgb);
        }
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            let value = key
                .parse::<i64>()
                .map_err(|_| ColorError::UnknownColor(s.to_owned()))?;
            return u8::try_from(value)
                .map(Self::Indexed)
                .map_err(|_| ColorError::Value {
                    channel: "index",
                    value,
                });
        }
        match key.as_str() {
            "normal" | "default" => Ok(Self::Normal),
            "gray" | "grey" => Ok(Self::Named(NamedColor::LightBlack)),
            "orange" => Ok(Self::Rgb(Rgb(210, 135, 10))),
            _ => NamedColor::ALL
                .into_iter()
                .find(|c| c.name() == key)
                .map(Self::Named)
                .ok_or_else(|| ColorError::UnknownColor(s.to_owned())),
        }
    }

    /// Checked RGB constructor for channel values coming from untyped input.
    pub fn try_rgb(r: i64, g: i64, b: i64) -> Result<Self, ColorError> {
        let chan = |channel: &'static str, value: i64| {
            u8::try_from(value).map_err(|_| ColorError::Value { channel, value })
        };
        Ok(Self::Rgb(Rgb(chan("red", r)?, chan("green", g)?, chan("blue", b)?)))
    }

    /// Best-effort RGB equivalent (`None` for the terminal default).
    #[must_use]
    pub fn to_rgb(self) -> Option<Rgb> {
        match self {
            Self::Normal => None,
            Self::Named(n) => Some(BASE16[n.index() as usize]),
            Self::Indexed(i) => Some(palette_rgb(i)),
            Self::Rgb(c) => Some(c),
        }
    }

    /// Escape sequence selecting this colour as foreground.
    #[must_use]
    pub fn fg(self) -> AnsiCode {
        match self {
            Self::Normal => AnsiCode::Static(""),
            Self::Named(n) => AnsiCode::named(n),
            Self::Indexed(i) => AnsiCode::indexed(i),
            Self::Rgb(Rgb(r, g, b)) => AnsiCode::rgb(r, g, b),
        }
    }
}

impl From<Rgb> for Color {
    #[inline]
    fn from(c: Rgb) -> Self {
        Self::Rgb(c)
    }
}

impl From<NamedColor> for Color {
    #[inline]
    fn from(c: NamedColor) -> Self {
        Self::Named(c)
    }
}

impl str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn palette_rgb(i: u8) -> Rgb {
    match i {
        0..=15 => BASE16[i as usize],
        16..=231 => {
            let n = i - 16;
            Rgb(
                CUBE_STEPS[(n / 36) as usize],
                CUBE_STEPS[((n / 6) % 6) as usize],
                CUBE_STEPS[(n % 6) as usize],
            )
        }
        _ => {
            let v = 8 + 10 * (i - 232);
            Rgb(v, v, v)
        }
    }
}

// --- AnsiCode ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiCode {
    Static(&'static str),
    Inline { buf: [u8; 20], len: u8 },
}

const NAMED_FG: [&str; 16] = [
    "\x1b[30m", "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m", "\x1b[37m",
    "\x1b[90m", "\x1b[91m", "\x1b[92m", "\x1b[93m", "\x1b[94m", "\x1b[95m", "\x1b[96m", "\x1b[97m",
];

impl AnsiCode {
    #[inline]
    #[must_use]
    pub const fn named(c: NamedColor) -> Self {
        Self::Static(NAMED_FG[c.index() as usize])
    }

    #[inline]
    #[must_use]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    /// 256-colour escape `ESC[38;5;Nm`.
    #[must_use]
    pub fn indexed(n: u8) -> Self {
        Self::inline(b"\x1b[38;5;", &[n])
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::inline(b"\x1b[38;2;", &[r, g, b])
    }

    fn inline(prefix: &[u8], values: &[u8]) -> Self {
        let mut buf = [0u8; 20];
        buf[..prefix.len()].copy_from_slice(prefix);
        let mut len = prefix.len();

        for (i, v) in values.iter().enumerate() {
            len += write_u8(&mut buf[len..], *v);
            if i + 1 != values.len() {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::Inline {
            buf,
            // at most 19 bytes
            len: len as u8,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            // only ASCII is ever written into `buf`
            Self::Inline { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or_default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in colour + reset sequence.  `Color::Normal` and empty text
/// come back unchanged.
#[must_use]
pub fn colorize(c: Color, text: &str) -> String {
    let code = c.fg();
    if code.is_empty() || text.is_empty() {
        return text.to_owned();
    }
    format!("{code}{text}{}", AnsiCode::reset())
}

/// Append `text` to `buf`, styled only when `enabled`.
#[inline]
pub fn push_painted(buf: &mut String, c: Color, text: &str, enabled: bool) {
    if enabled {
        buf.push_str(&colorize(c, text));
    } else {
        buf.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_hex_and_indices() {
        assert_eq!(Color::parse("Red"), Ok(Color::Named(NamedColor::Red)));
        assert_eq!(
            Color::parse("light-blue"),
            Ok(Color::Named(NamedColor::LightBlue))
        );
        assert_eq!(Color::parse("#0a0B0c"), Ok(Color::Rgb(Rgb(10, 11, 12))));
        assert_eq!(Color::parse("208"), Ok(Color::Indexed(208)));
        assert_eq!(Color::parse("normal"), Ok(Color::Normal));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            Color::parse("puce"),
            Err(ColorError::UnknownColor("puce".into()))
        );
        assert_eq!(Color::parse("#12345"), Err(ColorError::InvalidHexLength));
    }

    #[test]
    fn out_of_range_channels_are_value_errors() {
        assert_eq!(
            Color::try_rgb(0, 256, 0),
            Err(ColorError::Value {
                channel: "green",
                value: 256
            })
        );
        assert_eq!(
            Color::parse("300"),
            Err(ColorError::Value {
                channel: "index",
                value: 300
            })
        );
        assert!(Color::try_rgb(-1, 0, 0).is_err());
        assert_eq!(Color::try_rgb(1, 2, 3), Ok(Color::Rgb(Rgb(1, 2, 3))));
    }

    #[test]
    fn escape_codes() {
        assert_eq!(Color::Named(NamedColor::Red).fg().as_str(), "\x1b[31m");
        assert_eq!(
            Color::Named(NamedColor::LightBlack).fg().as_str(),
            "\x1b[90m"
        );
        assert_eq!(Color::Indexed(208).fg().as_str(), "\x1b[38;5;208m");
        assert_eq!(
            Color::Rgb(Rgb(255, 255, 255)).fg().as_str(),
            "\x1b[38;2;255;255;255m"
        );
        assert_eq!(Color::Rgb(Rgb(0, 7, 42)).fg().as_str(), "\x1b[38;2;0;7;42m");
        assert!(Color::Normal.fg().is_empty());
    }

    #[test]
    fn colorize_skips_normal() {
        assert_eq!(colorize(Color::Normal, "abc"), "abc");
        assert_eq!(
            colorize(Color::Named(NamedColor::Green), "abc"),
            "\x1b[32mabc\x1b[0m"
        );
    }

    #[test]
    fn palette_to_rgb() {
        assert_eq!(Color::Indexed(16).to_rgb(), Some(Rgb(0, 0, 0)));
        assert_eq!(Color::Indexed(231).to_rgb(), Some(Rgb(255, 255, 255)));
        assert_eq!(Color::Indexed(196).to_rgb(), Some(Rgb(255, 0, 0)));
        assert_eq!(Color::Indexed(232).to_rgb(), Some(Rgb(8, 8, 8)));
        assert_eq!(Color::Normal.to_rgb(), None);
    }
}
