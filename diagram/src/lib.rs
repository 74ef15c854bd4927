//! ASCII railroad diagrams for grammar rules.
//!
//! A front end hands over one [`Element`] tree per rule. [`layout`] turns it
//! into a [`Typeset`] tree with exact geometry, and [`render`] paints that
//! tree into text lines. [`write_rules`] runs both for a whole grammar,
//! reporting failures per rule.
//!
//! ```text
//! Foo:
//!     ||-- "a" -->---------v--||
//!                |         |
//!                ^-- "b" --<
//! ```

pub mod config;
pub mod error;
pub mod grammar;
pub mod layout;
pub mod output;
pub mod render;
pub mod sizing;
pub mod stack;
pub mod typeset;

pub use config::{ConfigError, DEFAULT_INDENT, RenderConfig};
pub use error::ErrorCode;
pub use grammar::{Element, GrammarError, Prettify, Rule, ToElement};
pub use layout::{LayoutError, layout, loop_label};
pub use output::{RuleError, Summary, diagram, format_block, write_rules};
pub use render::{RenderError, render};
pub use sizing::{AsciiSizing, Extent, Sizing};
pub use typeset::{Direction, LineStyle, Typeset};

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
