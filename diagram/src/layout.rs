//! Grammar tree to typeset tree.
//!
//! DESIGN
//! ======
//! Layout is a pure recursive walk. Every element maps to exactly one
//! [`Typeset`] node whose geometry comes from the typeset constructors, so
//! this module only decides *structure*: which rows exist, which row is flush
//! to the baseline, which line style and flow each row carries.
//!
//! Mirroring is decided here, not in the renderer. The requested
//! [`Direction`] is stamped on every `HList` and every `VList` row, and a
//! loop's return track is laid out in the reversed direction. The source
//! element tree is borrowed and never changed.

use std::cmp::Ordering;

use crate::error::ErrorCode;
use crate::grammar::{self, Element, GrammarError};
use crate::sizing::Sizing;
use crate::typeset::{Direction, LineStyle, Row, Typeset, TypesetError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The element tree itself is malformed.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// A typeset constructor rejected the structure built for an element.
    #[error(transparent)]
    Typeset(#[from] TypesetError),
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Grammar(e) => e.error_code(),
            Self::Typeset(e) => e.error_code(),
        }
    }
}

/// Lay out `element` flowing in `direction`.
///
/// # Errors
///
/// Returns [`LayoutError::Grammar`] for an empty alternation or a loop whose
/// minimum exceeds its bounded maximum, anywhere in the tree.
pub fn layout(element: &Element, sizing: &dyn Sizing, direction: Direction) -> Result<Typeset, LayoutError> {
    match element {
        Element::Skip => Ok(Typeset::skip()),
        Element::Ellipsis => Ok(Typeset::ellipsis()),
        Element::Literal { text, case_sensitive } => Ok(Typeset::literal(text, *case_sensitive, sizing)),
        Element::Rule { name } => Ok(Typeset::rule(name, sizing)),
        Element::Sequence { items } => layout_sequence(items, sizing, direction),
        Element::Alternation { branches } => layout_alternation(branches, sizing, direction),
        Element::Loop { forward, backward, min, max } => {
            layout_loop(forward, backward, (*min, *max), sizing, direction)
        }
    }
}

/// Repetition label for a loop's return track, if its bounds warrant one.
#[must_use]
pub fn loop_label(min: u32, max: u32) -> Option<String> {
    if min == 1 && max == 1 {
        Some("(exactly once)".to_owned())
    } else if max == 0 && min > 0 {
        Some(format!("(at least {min} times)"))
    } else if max > 0 && min == 0 {
        Some(format!("(up to {max} times)"))
    } else if max > 0 && min == max {
        Some(format!("({max} times)"))
    } else if max > 1 && min > 1 {
        Some(format!("({min}-{max} times)"))
    } else {
        None
    }
}

fn layout_sequence(items: &[Element], sizing: &dyn Sizing, direction: Direction) -> Result<Typeset, LayoutError> {
    let mut children = Vec::with_capacity(items.len());
    for item in items {
        let child = layout(item, sizing, direction)?;
        if !child.is_skip() {
            children.push(child);
        }
    }

    if children.len() <= 1 {
        return Ok(children.pop().unwrap_or_else(Typeset::skip));
    }
    Ok(Typeset::hlist(children, direction)?)
}

fn layout_alternation(
    branches: &[Element],
    sizing: &dyn Sizing,
    direction: Direction,
) -> Result<Typeset, LayoutError> {
    if branches.is_empty() {
        return Err(GrammarError::EmptyAlternation.into());
    }

    let nodes = branches
        .iter()
        .map(|branch| layout(branch, sizing, direction))
        .collect::<Result<Vec<_>, _>>()?;

    // [ x ]: the bypass goes over the top and x stays on the baseline.
    let above = usize::from(nodes.len() == 2 && nodes.first().is_some_and(Typeset::is_skip));

    let rows = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            let style = match i.cmp(&above) {
                Ordering::Less => LineStyle::Above,
                Ordering::Equal => LineStyle::Flush,
                Ordering::Greater => LineStyle::Below,
            };
            Row::new(node, style, direction)
        })
        .collect();

    Ok(Typeset::vlist(rows, above)?)
}

fn layout_loop(
    forward: &Element,
    backward: &Element,
    (min, max): (u32, u32),
    sizing: &dyn Sizing,
    direction: Direction,
) -> Result<Typeset, LayoutError> {
    grammar::check_loop_bounds(min, max)?;

    let back_flow = direction.reversed();
    let forward = layout(forward, sizing, direction)?;
    let backward = layout(backward, sizing, back_flow)?;
    let label = loop_label(min, max).map(|text| Typeset::label(&text, sizing));

    // A bare return track still needs to show which way it flows.
    let backward = if backward.is_skip() && label.is_none() { Typeset::arrow(back_flow) } else { backward };

    let rows = vec![
        Row::new(forward, LineStyle::Loop, direction),
        Row::new(backward, LineStyle::Return, back_flow).with_label(label),
    ];
    Ok(Typeset::vlist(rows, 0)?)
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
