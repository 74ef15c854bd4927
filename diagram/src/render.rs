//! Typeset tree to text lines.
//!
//! DESIGN
//! ======
//! The grid is allocated once at the exact size the root node reports
//! (`width + 8` columns for the two terminators, `ascent + descent` rows) and
//! never grows. Painting is a recursive walk addressed by baseline: a
//! [`Cursor`] names the leftmost column of a node and the row its track runs
//! along, and every child is painted against the same baseline its parent
//! computed for it.
//!
//! Every write goes through [`Grid::put`], which checks bounds. Geometry from
//! layout should make an out-of-bounds write impossible; if one happens it is
//! reported as [`RenderError::OutOfBounds`] rather than clipped.
//!
//! GLYPHS
//! ======
//! `-` is track, `|` is the spine joining the rows of a list, `^ v > <` are
//! junctions, `||--` and `--||` terminate the rule. `+` `,` `.` `` ` `` and
//! `'` are reserved.

use std::collections::TryReserveError;

use crate::error::ErrorCode;
use crate::sizing::char_columns;
use crate::stack::Stack;
use crate::typeset::{Direction, Kind, LineStyle, Row, Typeset};

/// Columns taken by each rule terminator.
pub const TERMINATOR_WIDTH: usize = 4;

const LEFT_TERMINATOR: &str = "||--";
const RIGHT_TERMINATOR: &str = "--||";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A write landed outside the grid.
    #[error("write at ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
    /// The grid's cell count does not fit in memory addressing.
    #[error("grid of {width}x{height} cells is too large")]
    GridTooLarge { width: usize, height: usize },
    /// The grid could not be allocated.
    #[error("grid allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
    /// An `HList` was reached under a context flowing the other way.
    #[error("list laid out {found:?} painted in {expected:?} context")]
    DirectionMismatch { expected: Direction, found: Direction },
    /// A node's geometry does not fit the space its parent gave it.
    #[error("node does not fit at column {col}, row {row}")]
    Geometry { col: usize, row: usize },
}

impl ErrorCode for RenderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "E_OUT_OF_BOUNDS",
            Self::GridTooLarge { .. } => "E_GRID_TOO_LARGE",
            Self::Allocation(_) => "E_ALLOCATION",
            Self::DirectionMismatch { .. } => "E_DIRECTION_MISMATCH",
            Self::Geometry { .. } => "E_GEOMETRY",
        }
    }
}

// =============================================================================
// GRID
// =============================================================================

/// Fixed-size character grid.
///
/// A wide character occupies its own cell plus a continuation cell (`None`)
/// to its right, so a row's cells always line up with display columns.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    /// Space-filled grid of `width` columns and `height` rows.
    ///
    /// # Errors
    ///
    /// [`RenderError::GridTooLarge`] on overflow, [`RenderError::Allocation`]
    /// when the allocator refuses.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let len = width.checked_mul(height).ok_or(RenderError::GridTooLarge { width, height })?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, Some(' '));
        Ok(Self { width, height, cells })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Character at a cell; `None` outside the grid or on a continuation.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        match self.index(x, y) {
            Ok(i) => self.cells[i],
            Err(_) => None,
        }
    }

    /// Write one character, returning the columns it took.
    ///
    /// # Errors
    ///
    /// [`RenderError::OutOfBounds`] if any column it covers is outside.
    pub fn put(&mut self, x: usize, y: usize, ch: char) -> Result<usize, RenderError> {
        let columns = char_columns(ch);
        if columns == 0 {
            return Ok(0);
        }

        let start = self.index(x, y)?;
        let end = self.index(x + columns - 1, y)?;

        // Never leave half of a wide character behind.
        if self.cells[start].is_none() && x > 0 {
            self.cells[start - 1] = Some(' ');
        }
        if self.cells.get(end + 1).is_some_and(Option::is_none) && x + columns < self.width {
            self.cells[end + 1] = Some(' ');
        }

        self.cells[start] = Some(ch);
        for cell in &mut self.cells[start + 1..=end] {
            *cell = None;
        }
        Ok(columns)
    }

    /// Write `text` from `(x, y)` rightwards, returning the columns used.
    ///
    /// # Errors
    ///
    /// [`RenderError::OutOfBounds`] on the first character that does not fit.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str) -> Result<usize, RenderError> {
        let mut col = x;
        for ch in text.chars() {
            col += self.put(col, y, ch)?;
        }
        Ok(col - x)
    }

    /// Rows as strings with trailing blanks removed.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height];
        }
        self.cells
            .chunks(self.width)
            .map(|row| {
                let line: String = row.iter().flatten().collect();
                line.trim_end().to_owned()
            })
            .collect()
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, RenderError> {
        if x >= self.width || y >= self.height {
            return Err(RenderError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y * self.width + x)
    }
}

// =============================================================================
// CONNECTORS
// =============================================================================

/// Which end of a row a junction glyph belongs to, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Entry,
    Exit,
}

/// Junction glyph for one end of a row.
#[must_use]
pub const fn connector(style: LineStyle, side: Side, mirrored: bool) -> char {
    match (style, side) {
        (LineStyle::Flush, _) => '-',
        (LineStyle::Above, Side::Entry) | (LineStyle::Below | LineStyle::Return, Side::Exit) => '^',
        (LineStyle::Above | LineStyle::Loop, Side::Exit) | (LineStyle::Below, Side::Entry) => 'v',
        (LineStyle::Loop | LineStyle::Return, Side::Entry) => {
            if mirrored {
                '<'
            } else {
                '>'
            }
        }
    }
}

/// Left and right margin glyphs for a row.
fn margins(row: &Row) -> (char, char) {
    let rtl = row.flow().is_rtl();
    let entry = connector(row.entry(), Side::Entry, rtl);
    let exit = connector(row.exit(), Side::Exit, rtl);
    if rtl { (exit, entry) } else { (entry, exit) }
}

// =============================================================================
// PAINTING
// =============================================================================

/// Grid position of a node: its leftmost column and its baseline row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
}

impl Cursor {
    const fn right(self, columns: usize) -> Self {
        Self { col: self.col + columns, row: self.row }
    }
}

/// Render `node` as a whole rule flowing in `direction`.
///
/// # Errors
///
/// Any [`RenderError`]; each one means the typeset tree disagrees with its
/// own geometry or the grid could not be allocated.
pub fn render(node: &Typeset, direction: Direction) -> Result<Vec<String>, RenderError> {
    let width = node.width() + 2 * TERMINATOR_WIDTH;
    let height = node.height();
    let baseline = node.ascent();

    let mut grid = Grid::new(width, height)?;
    tracing::debug!(width, height, baseline, "rendering diagram");

    grid.put_str(0, baseline, LEFT_TERMINATOR)?;
    grid.put_str(width - TERMINATOR_WIDTH, baseline, RIGHT_TERMINATOR)?;

    let mut ctx = RenderContext { grid, direction };
    ctx.paint(node, Cursor { col: TERMINATOR_WIDTH, row: baseline })?;
    Ok(ctx.grid.lines())
}

struct RenderContext {
    grid: Grid,
    direction: Direction,
}

impl RenderContext {
    fn paint(&mut self, node: &Typeset, at: Cursor) -> Result<(), RenderError> {
        match node.kind() {
            Kind::Skip => {}
            Kind::Arrow(direction) => {
                self.grid.put(at.col, at.row, if direction.is_rtl() { '<' } else { '>' })?;
            }
            Kind::Ellipsis => {
                self.grid.put(at.col, at.row, ':')?;
            }
            Kind::CsLiteral(text) => self.pieces(at, &[" \"", text, "\" "])?,
            Kind::CiLiteral(text) => self.pieces(at, &[" \"", text, "\"/i"])?,
            Kind::Rule(name) => self.pieces(at, &[" ", name, " "])?,
            Kind::Label(text) => self.pieces(at, &[text])?,
            Kind::HList { children, direction } => self.paint_hlist(children, *direction, at)?,
            Kind::VList { rows, baselines, .. } => self.paint_vlist(node, rows, baselines, at)?,
        }
        Ok(())
    }

    fn pieces(&mut self, at: Cursor, pieces: &[&str]) -> Result<(), RenderError> {
        let mut col = at.col;
        for piece in pieces {
            col += self.grid.put_str(col, at.row, piece)?;
        }
        Ok(())
    }

    fn paint_hlist(&mut self, children: &[Typeset], direction: Direction, at: Cursor) -> Result<(), RenderError> {
        if direction != self.direction {
            return Err(RenderError::DirectionMismatch { expected: self.direction, found: direction });
        }

        let mut at = at;
        if direction.is_rtl() {
            let mut stack = Stack::with_capacity(children.len());
            stack.extend(children);
            while let Some(child) = stack.pop() {
                at = self.segment(child, at, !stack.is_empty())?;
            }
        } else {
            let mut iter = children.iter().peekable();
            while let Some(child) = iter.next() {
                at = self.segment(child, at, iter.peek().is_some())?;
            }
        }
        Ok(())
    }

    /// Paint one list child and, unless it is the last, the track after it.
    fn segment(&mut self, child: &Typeset, at: Cursor, join: bool) -> Result<Cursor, RenderError> {
        self.paint(child, at)?;
        let mut at = at.right(child.width());
        if join {
            at = at.right(self.grid.put_str(at.col, at.row, "--")?);
        }
        Ok(at)
    }

    fn paint_vlist(
        &mut self,
        node: &Typeset,
        rows: &[Row],
        baselines: &[usize],
        at: Cursor,
    ) -> Result<(), RenderError> {
        let geometry = || RenderError::Geometry { col: at.col, row: at.row };
        let top = at.row.checked_sub(node.ascent()).ok_or_else(geometry)?;
        let inner = node.width().checked_sub(2).ok_or_else(geometry)?;
        let right = at.col + inner + 1;

        for (i, (row, offset)) in rows.iter().zip(baselines).enumerate() {
            let baseline = top + offset;
            let (left_glyph, right_glyph) = margins(row);
            self.grid.put(at.col, baseline, left_glyph)?;
            self.grid.put(right, baseline, right_glyph)?;

            let outer = self.direction;
            self.direction = row.flow();
            let painted = self.paint_row(row, Cursor { col: at.col + 1, row: baseline }, inner);
            self.direction = outer;
            painted?;

            if let Some(next) = baselines.get(i + 1) {
                for y in baseline + 1..top + next {
                    self.grid.put(at.col, y, '|')?;
                    self.grid.put(right, y, '|')?;
                }
            }
        }
        Ok(())
    }

    /// Centre a row's node (and label) in `space` columns of track.
    fn paint_row(&mut self, row: &Row, at: Cursor, space: usize) -> Result<(), RenderError> {
        let node = row.node();
        let lead = self.lead(node.width(), space, at)?;
        let fill = if matches!(node.kind(), Kind::Ellipsis) { ' ' } else { '-' };

        for col in at.col..at.col + lead {
            self.grid.put(col, at.row, fill)?;
        }
        self.paint(node, at.right(lead))?;
        for col in at.col + lead + node.width()..at.col + space {
            self.grid.put(col, at.row, fill)?;
        }

        if let Some(label) = row.label() {
            let lead = self.lead(label.width(), space, at)?;
            let row = if node.is_skip() { at.row } else { at.row + node.descent() + 1 + label.ascent() };
            self.paint(label, Cursor { col: at.col + lead, row })?;
        }
        Ok(())
    }

    /// Leading slack when centring `width` in `space`; the odd column goes
    /// last in flow order.
    fn lead(&self, width: usize, space: usize, at: Cursor) -> Result<usize, RenderError> {
        let slack = space.checked_sub(width).ok_or(RenderError::Geometry { col: at.col, row: at.row })?;
        Ok(if self.direction.is_rtl() { slack - slack / 2 } else { slack / 2 })
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
