//! Plot compositor: frames one canvas with borders, labels, decorations and
//! an optional colour bar, and lays the whole thing out as text.
//!
//! Layout, top to bottom:
//!
//! ```text
//!                  title                 (centred, ties pad left)
//!   tl            top              tr    (ties round away from zero)
//!          ┌──────────────────────┐ ┌──┐
//!   ylabel │        canvas        │ │██│ hi
//!       10 │                      │ │██│ zlabel
//!        0 │                      │ │██│ lo
//!          └──────────────────────┘ └──┘
//!   bl           bottom            br
//!                  xlabel
//! ```
//!
//! Every width is measured on escape-free text, so coloured and plain
//! renderings differ only in escape bytes.

use std::{fmt, str::FromStr};

use tracing::{debug, trace};

use crate::{
    core::{
        border::BorderStyle,
        color::{BORDER_COLOR, Color, SERIES_CYCLE, push_painted},
        config::PlotConfig,
        constants::{BORDER_WIDTH, COLORBAR_SWATCH_WIDTH},
        error::PlotError,
        text::{center_gap_ties_away, center_pad_ties_up, format_num, push_spaces, visible_width},
    },
    render::canvas::Canvas,
};

/// Where an annotation goes.  `Left`/`Right` address the per-row label
/// columns; everything else is a fixed slot above or below the border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    TopLeft,
    Top,
    TopRight,
    BottomLeft,
    Bottom,
    BottomRight,
    Left,
    Right,
}

impl Location {
    /// Index into the fixed decoration slots.
    const fn slot(self) -> Option<usize> {
        match self {
            Self::TopLeft => Some(0),
            Self::Top => Some(1),
            Self::TopRight => Some(2),
            Self::BottomLeft => Some(3),
            Self::Bottom => Some(4),
            Self::BottomRight => Some(5),
            Self::Left | Self::Right => None,
        }
    }
}

impl FromStr for Location {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .trim()
            .trim_start_matches(':')
            .to_ascii_lowercase()
            .replace(['-', ' '], "_");
        match key.as_str() {
            "top_left" | "tl" => Ok(Self::TopLeft),
            "top" | "t" => Ok(Self::Top),
            "top_right" | "tr" => Ok(Self::TopRight),
            "bottom_left" | "bl" => Ok(Self::BottomLeft),
            "bottom" | "b" => Ok(Self::Bottom),
            "bottom_right" | "br" => Ok(Self::BottomRight),
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(PlotError::argument(format!("unknown location `{s}`"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub color: Color,
}

impl Label {
    fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    fn width(&self) -> usize {
        visible_width(&self.text)
    }
}

const TOP_SLOTS: [Location; 3] = [Location::TopLeft, Location::Top, Location::TopRight];
const BOTTOM_SLOTS: [Location; 3] = [Location::BottomLeft, Location::Bottom, Location::BottomRight];

/// A canvas plus everything drawn around it.
#[derive(Clone, Debug)]
pub struct Plot {
    canvas: Canvas,
    cfg: PlotConfig,
    labels_left: Vec<Option<Label>>,
    labels_right: Vec<Option<Label>>,
    decorations: [Option<Label>; 6],
    series_cursor: usize,
}

impl Plot {
    pub fn new(canvas: impl Into<Canvas>, cfg: PlotConfig) -> Self {
        let canvas = canvas.into();
        let rows = canvas.nrows();
        debug!(
            cols = canvas.ncols(),
            rows,
            border = cfg.border.name(),
            colorbar = cfg.colorbar,
            "plot created"
        );
        Self {
            canvas,
            cfg,
            labels_left: vec![None; rows],
            labels_right: vec![None; rows],
            decorations: Default::default(),
            series_cursor: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Direct access for canvas-specific calls such as adding bars.
    #[inline]
    pub const fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &PlotConfig {
        &self.cfg
    }

    pub fn set_title(&mut self, s: impl Into<String>) {
        self.cfg.title = s.into();
    }

    pub fn set_xlabel(&mut self, s: impl Into<String>) {
        self.cfg.xlabel = s.into();
    }

    pub fn set_ylabel(&mut self, s: impl Into<String>) {
        self.cfg.ylabel = s.into();
    }

    pub fn set_zlabel(&mut self, s: impl Into<String>) {
        self.cfg.zlabel = s.into();
    }

    pub fn set_border(&mut self, b: BorderStyle) {
        self.cfg.border = b;
    }

    /// Row label on `loc`'s side; `None` for fixed locations.
    #[must_use]
    pub fn row_label(&self, loc: Location, row: usize) -> Option<&Label> {
        let side = match loc {
            Location::Left => &self.labels_left,
            Location::Right => &self.labels_right,
            _ => return None,
        };
        side.get(row).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn decoration(&self, loc: Location) -> Option<&Label> {
        loc.slot().and_then(|i| self.decorations[i].as_ref())
    }

    /// Row label column for `loc`, grown to the canvas' current height.
    fn side_mut(&mut self, loc: Location) -> Option<&mut Vec<Option<Label>>> {
        let rows = self.canvas.nrows();
        let side = match loc {
            Location::Left => &mut self.labels_left,
            Location::Right => &mut self.labels_right,
            _ => return None,
        };
        if side.len() < rows {
            side.resize(rows, None);
        }
        Some(side)
    }

    /// Place `text` at `loc`.
    ///
    /// Fixed locations are overwritten.  `Left`/`Right` take the first row
    /// whose label on that side is missing or empty; when every row is taken
    /// (or the canvas has no rows) nothing happens.
    pub fn annotate(&mut self, loc: Location, text: impl Into<String>, color: Color) {
        let label = Label::new(text, color);
        if let Some(i) = loc.slot() {
            self.decorations[i] = Some(label);
            return;
        }
        let rows = self.canvas.nrows();
        if let Some(side) = self.side_mut(loc) {
            if let Some(slot) = side[..rows]
                .iter_mut()
                .find(|l| l.as_ref().is_none_or(|l| l.text.is_empty()))
            {
                *slot = Some(label);
            }
        }
    }

    /// Place `text` on row `row` (0 = top) of the `Left`/`Right` column,
    /// replacing whatever was there.
    pub fn annotate_row(
        &mut self,
        loc: Location,
        row: usize,
        text: impl Into<String>,
        color: Color,
    ) -> Result<(), PlotError> {
        let rows = self.canvas.nrows();
        if row >= rows {
            return Err(PlotError::argument(format!(
                "row {row} is outside the canvas (0..{rows})"
            )));
        }
        let side = self.side_mut(loc).ok_or_else(|| {
            PlotError::argument(format!("{loc:?} does not take a row index"))
        })?;
        side[row] = Some(Label::new(text, color));
        Ok(())
    }

    /// Next colour of the series palette; wraps around.
    pub fn next_series_color(&mut self) -> Color {
        let c = SERIES_CYCLE[self.series_cursor];
        self.series_cursor = (self.series_cursor + 1) % SERIES_CYCLE.len();
        c
    }

    fn check_series(&self, xs: &[f64], ys: &[f64]) -> Result<(), PlotError> {
        PlotError::check_len("x/y", xs.len(), ys.len())?;
        xs.iter()
            .zip(ys)
            .try_for_each(|(&x, &y)| self.canvas.check_point(x, y))
    }

    /// Scatter `(xs[i], ys[i])`.  Without an explicit colour the next series
    /// colour is used.  Returns the colour drawn with.
    pub fn points(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        color: Option<Color>,
    ) -> Result<Color, PlotError> {
        self.check_series(xs, ys)?;
        let color = color.unwrap_or_else(|| self.next_series_color());
        for (&x, &y) in xs.iter().zip(ys) {
            self.canvas.plot_point(x, y, color)?;
        }
        debug!(points = xs.len(), ?color, "points added");
        Ok(color)
    }

    /// Connect consecutive `(xs[i], ys[i])` with line segments.
    pub fn lines(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        color: Option<Color>,
    ) -> Result<Color, PlotError> {
        self.check_series(xs, ys)?;
        let color = color.unwrap_or_else(|| self.next_series_color());
        if let ([x], [y]) = (xs, ys) {
            self.canvas.plot_point(*x, *y, color)?;
        }
        for (w, v) in xs.windows(2).zip(ys.windows(2)) {
            self.canvas.plot_line((w[0], v[0]), (w[1], v[1]), color)?;
        }
        debug!(points = xs.len(), ?color, "line series added");
        Ok(color)
    }

    /// A single segment from `a` to `b`.
    pub fn line(
        &mut self,
        a: (f64, f64),
        b: (f64, f64),
        color: Option<Color>,
    ) -> Result<Color, PlotError> {
        self.lines(&[a.0, b.0], &[a.1, b.1], color)
    }

    /// Print the canvas limits: y on the first and last left labels, x in the
    /// bottom corners.  A one-row canvas shows only the upper y limit.
    pub fn label_axes(&mut self) {
        let rows = self.canvas.nrows();
        if let (Some((lo, hi)), Some(side)) = (self.canvas.yrange(), self.side_mut(Location::Left)) {
            // a single row only has room for the upper limit
            if rows > 1 {
                side[rows - 1] = Some(Label::new(format_num(lo), BORDER_COLOR));
            }
            if rows > 0 {
                side[0] = Some(Label::new(format_num(hi), BORDER_COLOR));
            }
        }
        if let Some((lo, hi)) = self.canvas.xrange() {
            self.annotate(Location::BottomLeft, format_num(lo), BORDER_COLOR);
            self.annotate(Location::BottomRight, format_num(hi), BORDER_COLOR);
        }
    }

    // --- Rendering ---

    fn paint_border(&self, buf: &mut String, style: BorderStyle, text: &str, color: bool) {
        let c = if style == BorderStyle::None {
            Color::Normal
        } else {
            BORDER_COLOR
        };
        push_painted(buf, c, text, color);
    }

    /// One line holding the left, centre and right slot of `slots`, or
    /// `None` when all three are empty.
    fn decoration_line(
        &self,
        slots: [Location; 3],
        indent: usize,
        border_w: usize,
        color: bool,
    ) -> Option<String> {
        let [l, m, r] = slots.map(|loc| self.decoration(loc).filter(|d| !d.text.is_empty()));
        if l.is_none() && m.is_none() && r.is_none() {
            return None;
        }
        let width = |d: Option<&Label>| d.map_or(0, Label::width);
        let (lw, mw, rw) = (width(l), width(m), width(r));

        let mut line = String::new();
        push_spaces(&mut line, indent);
        let push = |line: &mut String, d: Option<&Label>| {
            if let Some(d) = d {
                push_painted(line, d.color, &d.text, color);
            }
        };
        push(&mut line, l);
        let gap = center_gap_ties_away(border_w, mw, lw).max(0);
        push_spaces(&mut line, gap as usize);
        push(&mut line, m);
        let rest = border_w as i64 - (rw + lw + mw) as i64 - gap;
        push_spaces(&mut line, rest.max(0) as usize);
        push(&mut line, r);
        Some(line)
    }

    fn centered_line(indent: usize, border_w: usize, text: &str) -> String {
        let mut line = String::new();
        push_spaces(&mut line, indent + center_pad_ties_up(border_w, visible_width(text)));
        line.push_str(text);
        line
    }

    /// Colour bar segments for the band from the top border (index 0) to
    /// the bottom border (index `rows + 1`).
    fn colorbar_lane(&self, rows: usize, color: bool) -> Option<Vec<String>> {
        if !self.cfg.colorbar {
            return None;
        }
        let style = self.cfg.colorbar_border;
        let g = style.glyphs();
        let (lo, hi) = self.cfg.colorbar_lim;
        let (lo, hi) = (format_num(lo), format_num(hi));

        let mut labels = vec![""; rows + 2];
        let hi_at = usize::from(rows >= 1);
        let lo_at = if rows >= 2 { rows } else { rows + 1 };
        labels[hi_at] = &hi;
        labels[lo_at] = &lo;
        if !self.cfg.zlabel.is_empty() {
            let mid = rows.div_ceil(2).max(1);
            if mid > hi_at && mid < lo_at {
                labels[mid] = &self.cfg.zlabel;
            } else if hi_at != 0 {
                labels[0] = &self.cfg.zlabel;
            }
        }

        let inner = COLORBAR_SWATCH_WIDTH - BORDER_WIDTH;
        let swatch: String = "█".repeat(inner);
        let lane = (0..rows + 2)
            .map(|i| {
                let mut seg = String::new();
                push_spaces(&mut seg, self.cfg.padding);
                if i == 0 {
                    let edge = format!("{}{}{}", g.tl, g.t.to_string().repeat(inner), g.tr);
                    self.paint_border(&mut seg, style, &edge, color);
                } else if i == rows + 1 {
                    let edge = format!("{}{}{}", g.bl, g.b.to_string().repeat(inner), g.br);
                    self.paint_border(&mut seg, style, &edge, color);
                } else {
                    let frac = if rows <= 1 {
                        1.0
                    } else {
                        1.0 - (i - 1) as f64 / (rows - 1) as f64
                    };
                    let c = Color::Rgb(self.cfg.colormap.sample(frac));
                    self.paint_border(&mut seg, style, &g.l.to_string(), color);
                    push_painted(&mut seg, c, &swatch, color);
                    self.paint_border(&mut seg, style, &g.r.to_string(), color);
                }
                if !labels[i].is_empty() {
                    seg.push(' ');
                    seg.push_str(labels[i]);
                }
                seg
            })
            .collect();
        Some(lane)
    }

    /// Lay the plot out as text.  Lines are separated by `\n` with no
    /// trailing newline and all share the same visible width; `color`
    /// switches escape sequences on.
    #[must_use]
    pub fn render(&self, color: bool) -> String {
        let cfg = &self.cfg;
        let rows = self.canvas.nrows();
        let border_w = self.canvas.ncols() + BORDER_WIDTH;
        let g = cfg.border.glyphs();
        let show = cfg.labels;

        let ylabel = if show { cfg.ylabel.as_str() } else { "" };
        let ylabel_w = if ylabel.is_empty() {
            0
        } else {
            visible_width(ylabel) + 1
        };
        let ylabel_row = rows.div_ceil(2).saturating_sub(1);
        let left_labels = visible_labels(&self.labels_left, rows, show);
        let right_labels = visible_labels(&self.labels_right, rows, show);
        let widest = |labels: &[Option<&Label>]| {
            labels.iter().flatten().map(|l| l.width()).max().unwrap_or(0)
        };
        let left_rows_w = widest(&left_labels);
        let right_w = widest(&right_labels);
        let indent = cfg.margin + ylabel_w + left_rows_w + cfg.padding;

        let lane = self.colorbar_lane(rows, color);
        let push_lane = |line: &mut String, i: usize| {
            if let Some(lane) = &lane {
                if right_w > 0 {
                    push_spaces(line, cfg.padding + right_w);
                }
                line.push_str(&lane[i]);
            }
        };

        let mut lines: Vec<String> = Vec::with_capacity(rows + 6);

        if !cfg.title.is_empty() {
            lines.push(Self::centered_line(indent, border_w, &cfg.title));
        }
        if show {
            lines.extend(self.decoration_line(TOP_SLOTS, indent, border_w, color));
        }

        let edge = |l: char, m: char, r: char| {
            let mut s = String::with_capacity(border_w * 3);
            s.push(l);
            s.extend(std::iter::repeat_n(m, border_w - BORDER_WIDTH));
            s.push(r);
            s
        };

        let mut top = String::new();
        push_spaces(&mut top, indent);
        self.paint_border(&mut top, cfg.border, &edge(g.tl, g.t, g.tr), color);
        push_lane(&mut top, 0);
        lines.push(top);

        for r in 0..rows {
            let mut line = String::new();
            push_spaces(&mut line, cfg.margin);
            if ylabel_w > 0 {
                if r == ylabel_row {
                    line.push_str(ylabel);
                    line.push(' ');
                } else {
                    push_spaces(&mut line, ylabel_w);
                }
            }
            let left = left_labels[r];
            push_spaces(&mut line, left_rows_w - left.map_or(0, Label::width));
            if let Some(l) = left {
                push_painted(&mut line, l.color, &l.text, color);
            }
            push_spaces(&mut line, cfg.padding);

            self.paint_border(&mut line, cfg.border, &g.l.to_string(), color);
            self.canvas.push_row(&mut line, r, color);
            self.paint_border(&mut line, cfg.border, &g.r.to_string(), color);

            let right = right_labels[r];
            if right_w > 0 {
                push_spaces(&mut line, cfg.padding);
                if let Some(l) = right {
                    push_painted(&mut line, l.color, &l.text, color);
                }
                push_spaces(&mut line, right_w - right.map_or(0, Label::width));
            }
            if let Some(lane) = &lane {
                line.push_str(&lane[r + 1]);
            }
            lines.push(line);
        }

        let mut bottom = String::new();
        push_spaces(&mut bottom, indent);
        self.paint_border(&mut bottom, cfg.border, &edge(g.bl, g.b, g.br), color);
        push_lane(&mut bottom, rows + 1);
        lines.push(bottom);

        if show {
            lines.extend(self.decoration_line(BOTTOM_SLOTS, indent, border_w, color));
        }
        if !cfg.xlabel.is_empty() {
            lines.push(Self::centered_line(indent, border_w, &cfg.xlabel));
        }

        let width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
        for line in &mut lines {
            let w = visible_width(line);
            push_spaces(line, width - w);
        }
        trace!(lines = lines.len(), width, color, "plot rendered");
        lines.join("\n")
    }
}

/// Labels shown on rows `0..rows` of one side.
fn visible_labels(side: &[Option<Label>], rows: usize, show: bool) -> Vec<Option<&Label>> {
    (0..rows)
        .map(|r| side.get(r).and_then(Option::as_ref).filter(|_| show))
        .collect()
}

impl fmt::Display for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
