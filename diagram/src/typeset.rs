//! Geometry-annotated diagram tree.
//!
//! DESIGN
//! ======
//! A [`Typeset`] node is the output of layout and the only input to the
//! renderer. Its [`Extent`] is computed exactly once, by the constructor that
//! builds it, from the already-fixed extents of its children. Fields are
//! private, so a node's geometry can never disagree with its contents and the
//! renderer can size its grid up front and trust every offset it derives.
//!
//! Lists come in two shapes:
//!
//! - [`Kind::HList`]: children side by side on a common baseline, joined by
//!   two-column track segments.
//! - [`Kind::VList`]: [`Row`]s stacked top to bottom with one spacer row in
//!   between, joined at both margins by vertical bars. One row is the flush
//!   row whose baseline is the list's baseline; at most one row sits above it.

use crate::error::ErrorCode;
use crate::sizing::{Extent, Sizing};

/// Most rows a [`Kind::VList`] may place above its flush row.
pub const MAX_ROWS_ABOVE: usize = 1;

/// Columns a `VList` adds around its widest row (margin glyph plus two
/// columns of track on each side).
pub const VLIST_MARGIN: usize = 6;

/// Columns of track between consecutive `HList` children.
pub const HLIST_JOIN: usize = 2;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesetError {
    /// A horizontal list needs at least one child.
    #[error("horizontal list has no children")]
    EmptyList,
    /// A vertical list needs at least one row.
    #[error("vertical list has no rows")]
    NoRows,
    /// The flush row index must name one of the rows.
    #[error("flush row {above} out of range for {rows} rows")]
    FlushRowOutOfRange { above: usize, rows: usize },
    /// Only [`MAX_ROWS_ABOVE`] rows fit above the baseline.
    #[error("{above} rows above the baseline; at most {max} supported", max = MAX_ROWS_ABOVE)]
    TooManyRowsAbove { above: usize },
}

impl ErrorCode for TypesetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyList => "E_EMPTY_LIST",
            Self::NoRows => "E_NO_ROWS",
            Self::FlushRowOutOfRange { .. } => "E_FLUSH_ROW_OUT_OF_RANGE",
            Self::TooManyRowsAbove { .. } => "E_TOO_MANY_ROWS_ABOVE",
        }
    }
}

// =============================================================================
// DIRECTION AND LINE STYLES
// =============================================================================

/// Flow direction of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ltr => Self::Rtl,
            Self::Rtl => Self::Ltr,
        }
    }

    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// Junction shape at one end of a `VList` row.
///
/// Alternation rows are `Above`, `Flush` or `Below` according to where they
/// sit relative to the list's baseline. Loop rows are `Loop` (the forward
/// track) and `Return` (the track carrying flow back to the start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Flush,
    Above,
    Below,
    Loop,
    Return,
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Skip,
    Arrow(Direction),
    Ellipsis,
    CiLiteral(String),
    CsLiteral(String),
    Label(String),
    Rule(String),
    HList {
        children: Vec<Typeset>,
        direction: Direction,
    },
    VList {
        rows: Vec<Row>,
        above: usize,
        /// Baseline of each row, counted from the list's top row.
        baselines: Vec<usize>,
    },
}

/// A laid-out node with its fixed geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typeset {
    extent: Extent,
    kind: Kind,
}

impl Typeset {
    #[must_use]
    pub fn skip() -> Self {
        Self { extent: Extent::new(0, 0, 1), kind: Kind::Skip }
    }

    #[must_use]
    pub fn arrow(direction: Direction) -> Self {
        Self { extent: Extent::new(1, 0, 1), kind: Kind::Arrow(direction) }
    }

    #[must_use]
    pub fn ellipsis() -> Self {
        Self { extent: Extent::new(1, 0, 1), kind: Kind::Ellipsis }
    }

    /// A quoted terminal. The case-insensitive form carries a `/i` marker.
    #[must_use]
    pub fn literal(text: &str, case_sensitive: bool, sizing: &dyn Sizing) -> Self {
        let measured = sizing.measure(text);
        if case_sensitive {
            Self { extent: measured.widen(4), kind: Kind::CsLiteral(text.to_owned()) }
        } else {
            Self { extent: measured.widen(5), kind: Kind::CiLiteral(text.to_owned()) }
        }
    }

    #[must_use]
    pub fn rule(name: &str, sizing: &dyn Sizing) -> Self {
        Self { extent: sizing.measure(name).widen(2), kind: Kind::Rule(name.to_owned()) }
    }

    #[must_use]
    pub fn label(text: &str, sizing: &dyn Sizing) -> Self {
        Self { extent: sizing.measure(text), kind: Kind::Label(text.to_owned()) }
    }

    /// Children side by side in `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`TypesetError::EmptyList`] when `children` is empty.
    pub fn hlist(children: Vec<Typeset>, direction: Direction) -> Result<Self, TypesetError> {
        if children.is_empty() {
            return Err(TypesetError::EmptyList);
        }

        let joins = HLIST_JOIN * (children.len() - 1);
        let extent = children.iter().fold(Extent::new(joins, 0, 0), |acc, child| Extent {
            width: acc.width + child.width(),
            ascent: acc.ascent.max(child.ascent()),
            descent: acc.descent.max(child.descent()),
        });

        Ok(Self { extent, kind: Kind::HList { children, direction } })
    }

    /// Rows stacked top to bottom, with row `above` flush to the baseline.
    ///
    /// # Errors
    ///
    /// - [`TypesetError::NoRows`] when `rows` is empty.
    /// - [`TypesetError::FlushRowOutOfRange`] when `above >= rows.len()`.
    /// - [`TypesetError::TooManyRowsAbove`] when `above > MAX_ROWS_ABOVE`.
    pub fn vlist(rows: Vec<Row>, above: usize) -> Result<Self, TypesetError> {
        if rows.is_empty() {
            return Err(TypesetError::NoRows);
        }
        if above >= rows.len() {
            return Err(TypesetError::FlushRowOutOfRange { above, rows: rows.len() });
        }
        if above > MAX_ROWS_ABOVE {
            return Err(TypesetError::TooManyRowsAbove { above });
        }

        let mut baselines: Vec<usize> = Vec::with_capacity(rows.len());
        let mut width = 0;
        let mut bottom = 0;
        for row in &rows {
            let extent = row.extent();
            let baseline = if baselines.is_empty() { extent.ascent } else { bottom + 1 + extent.ascent };
            baselines.push(baseline);
            bottom = baseline + extent.descent;
            width = width.max(extent.width);
        }

        let ascent = baselines.get(above).copied().unwrap_or_default();
        let extent = Extent::new(width + VLIST_MARGIN, ascent, bottom - ascent);

        Ok(Self { extent, kind: Kind::VList { rows, above, baselines } })
    }

    #[must_use]
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.extent.width
    }

    #[must_use]
    pub const fn ascent(&self) -> usize {
        self.extent.ascent
    }

    #[must_use]
    pub const fn descent(&self) -> usize {
        self.extent.descent
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.extent.height()
    }

    #[must_use]
    pub const fn kind(&self) -> &Kind {
        &self.kind
    }

    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self.kind, Kind::Skip)
    }
}

// =============================================================================
// ROWS
// =============================================================================

/// One track of a [`Kind::VList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    node: Typeset,
    entry: LineStyle,
    exit: LineStyle,
    flow: Direction,
    label: Option<Typeset>,
}

impl Row {
    #[must_use]
    pub fn new(node: Typeset, style: LineStyle, flow: Direction) -> Self {
        Self { node, entry: style, exit: style, flow, label: None }
    }

    /// Attach a label drawn under the row's node, or over the bare track when
    /// the node is a skip.
    #[must_use]
    pub fn with_label(mut self, label: Option<Typeset>) -> Self {
        self.label = label;
        self
    }

    /// Geometry the row contributes to its list.
    #[must_use]
    pub fn extent(&self) -> Extent {
        let node = self.node.extent();
        let Some(label) = &self.label else {
            return node;
        };

        let width = node.width.max(label.width());
        if self.node.is_skip() {
            Extent::new(width, node.ascent.max(label.ascent()), node.descent.max(label.descent()))
        } else {
            Extent::new(width, node.ascent, node.descent + 1 + label.height())
        }
    }

    #[must_use]
    pub const fn node(&self) -> &Typeset {
        &self.node
    }

    #[must_use]
    pub const fn entry(&self) -> LineStyle {
        self.entry
    }

    #[must_use]
    pub const fn exit(&self) -> LineStyle {
        self.exit
    }

    #[must_use]
    pub const fn flow(&self) -> Direction {
        self.flow
    }

    #[must_use]
    pub const fn label(&self) -> Option<&Typeset> {
        self.label.as_ref()
    }
}

#[cfg(test)]
#[path = "typeset_test.rs"]
mod tests;
