//! Visible-width arithmetic shared by every layout decision.
//!
//! Widths are always measured on text with escape sequences removed, so a
//! coloured and a plain rendering of the same plot differ only in escape
//! bytes.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::core::constants::SIGNIFICANT_DIGITS;

static SGR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("static SGR pattern"));

/// Remove every SGR escape sequence.
#[inline]
#[must_use]
pub fn strip(text: &str) -> Cow<'_, str> {
    SGR.replace_all(text, "")
}

/// Terminal columns occupied by `text` once escapes are stripped.
#[inline]
#[must_use]
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip(text).as_ref())
}

#[inline]
pub fn push_spaces(buf: &mut String, n: usize) {
    buf.extend(std::iter::repeat_n(' ', n));
}

/// Left pad for centring `len` columns inside `total`; on a tie the extra
/// column goes to the left.
#[inline]
#[must_use]
pub fn center_pad_ties_up(total: usize, len: usize) -> usize {
    let diff = total as i64 - len as i64;
    (diff + 1).div_euclid(2).max(0) as usize
}

/// Gap between a left text and a centred middle text on a decoration line,
/// rounded half away from zero.
#[inline]
#[must_use]
pub fn center_gap_ties_away(total: usize, mid: usize, left: usize) -> i64 {
    (total as f64 / 2.0 - mid as f64 / 2.0 - left as f64).round() as i64
}

/// Format a number with [`SIGNIFICANT_DIGITS`] significant digits, dropping
/// trailing zeros (integral values print without a fractional part).
#[must_use]
pub fn format_num(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return "0".to_owned();
    }
    let magnitude = v.abs().log10().floor() as i64;
    let decimals = (SIGNIFICANT_DIGITS as i64 - 1 - magnitude).max(0) as usize;
    let mut s = format!("{v:.decimals$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::{Color, NamedColor, Rgb, colorize};

    #[test]
    fn strip_inverts_colorize() {
        let colors = [
            Color::Normal,
            Color::Named(NamedColor::LightMagenta),
            Color::Indexed(33),
            Color::Rgb(Rgb(1, 200, 30)),
        ];
        for c in colors {
            for text in ["", "x", "⣿⡇ label", "1.5e3"] {
                assert_eq!(strip(&colorize(c, text)), text);
            }
        }
        let joined = format!(
            "{}{}",
            colorize(Color::Named(NamedColor::Red), "ab"),
            colorize(Color::Indexed(200), "cd")
        );
        assert_eq!(strip(&joined), "abcd");
    }

    #[test]
    fn width_ignores_escapes() {
        let c = colorize(Color::Rgb(Rgb(9, 9, 9)), "⠁⠂⠄");
        assert_eq!(visible_width(&c), 3);
        assert_eq!(visible_width("┌──┐"), 4);
    }

    #[test]
    fn title_centering_rounds_left_pad_up() {
        assert_eq!(center_pad_ties_up(12, 3), 5);
        assert_eq!(center_pad_ties_up(12, 4), 4);
        assert_eq!(center_pad_ties_up(4, 10), 0);
    }

    #[test]
    fn decoration_gap_rounds_away_from_zero() {
        // 12/2 - 3/2 - 0 = 4.5
        assert_eq!(center_gap_ties_away(12, 3, 0), 5);
        // 11/2 - 0 - 4 = 1.5
        assert_eq!(center_gap_ties_away(11, 0, 4), 2);
        // 10/2 - 3/2 - 6 = -2.5
        assert_eq!(center_gap_ties_away(10, 3, 6), -3);
    }

    #[test]
    fn numbers_use_significant_digits() {
        assert_eq!(format_num(0.0), "0");
        assert_eq!(format_num(1.0), "1");
        assert_eq!(format_num(-1.0), "-1");
        assert_eq!(format_num(3.141_592), "3.142");
        assert_eq!(format_num(14.8326), "14.83");
        assert_eq!(format_num(0.001_234_6), "0.001235");
        assert_eq!(format_num(9.999_96), "10");
        assert_eq!(format_num(2500.0), "2500");
        assert_eq!(format_num(-0.000_01), "-0.00001");
    }
}
