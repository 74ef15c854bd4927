//! Text measurement policies.
//!
//! The layout engine never measures text itself. It asks a [`Sizing`] policy
//! for the extent of every literal, rule name and label, so different output
//! targets can size glyphs differently. [`AsciiSizing`] is the character-grid
//! policy used by the text renderer.

use unicode_width::UnicodeWidthChar;

/// Geometry of a laid-out box, in grid cells.
///
/// `ascent` counts the rows above the baseline; `descent` counts the rows at
/// and below it, so the baseline row itself belongs to the descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: usize,
    pub ascent: usize,
    pub descent: usize,
}

impl Extent {
    #[must_use]
    pub const fn new(width: usize, ascent: usize, descent: usize) -> Self {
        Self { width, ascent, descent }
    }

    /// Total number of rows.
    #[must_use]
    pub const fn height(self) -> usize {
        self.ascent + self.descent
    }

    /// Same height, `extra` more columns.
    #[must_use]
    pub const fn widen(self, extra: usize) -> Self {
        Self { width: self.width + extra, ..self }
    }
}

/// Measures a run of text for a particular rendering target.
pub trait Sizing {
    fn measure(&self, text: &str) -> Extent;
}

/// One cell per printable column, one row per text run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiSizing;

impl Sizing for AsciiSizing {
    fn measure(&self, text: &str) -> Extent {
        Extent::new(display_width(text), 0, 1)
    }
}

/// Number of grid columns `text` occupies.
///
/// Control characters take no space; East Asian wide characters take two.
/// The grid writer skips exactly the characters counted as zero here, which
/// keeps measured and painted widths in agreement.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_columns).sum()
}

/// Columns taken by a single character (see [`display_width`]).
#[must_use]
pub fn char_columns(ch: char) -> usize {
    if ch.is_control() { 0 } else { ch.width().unwrap_or(0) }
}

#[cfg(test)]
#[path = "sizing_test.rs"]
mod tests;
