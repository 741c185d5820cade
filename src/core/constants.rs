//! A collection of constants.

/// Left + right border glyphs around the canvas.
pub const BORDER_WIDTH: usize = 2;

/// Default number of spaces left of everything.
pub const DEFAULT_MARGIN: usize = 3;
/// Default number of spaces between the row labels and the border.
pub const DEFAULT_PADDING: usize = 1;

/// Canvas must be at least 5 characters wide.
pub const MIN_CANVAS_WIDTH: usize = 5;
/// Canvas must be at least 2 characters tall.
pub const MIN_CANVAS_HEIGHT: usize = 2;

/// Default canvas size used by the plot constructors.
pub const DEFAULT_WIDTH: usize = 40;
pub const DEFAULT_HEIGHT: usize = 15;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Numbers on axes and colour bars keep this many significant digits.
///
/// 14.8326 becomes 14.83
pub const SIGNIFICANT_DIGITS: usize = 4;

/// A flat auto range is widened by ±5 % of its value...
pub const AUTO_PAD_FRACTION: f64 = 0.05;
/// ...or by ±0.5 when that is not representable (zero data).
pub const MIN_AUTO_PAD: f64 = 0.5;

/// Width of the colour bar swatch, border glyphs included.
pub const COLORBAR_SWATCH_WIDTH: usize = 4;
