//! Grammar element tree, the input to the layout engine.
//!
//! DESIGN
//! ======
//! Front ends (BNF, ABNF, JSON, ...) turn a parsed rule into an [`Element`]
//! tree. This crate only consumes these trees; it never builds them from
//! source text. The two seams a front end plugs into are [`ToElement`]
//! (per-rule conversion, which may fail) and [`Prettify`] (optional tree
//! simplification before layout).
//!
//! Malformed trees (an alternation without branches, a loop whose minimum
//! exceeds its bounded maximum) are rejected with a [`GrammarError`], never
//! repaired.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// An alternation must offer at least one branch.
    #[error("alternation has no branches")]
    EmptyAlternation,
    /// A bounded loop cannot require more repetitions than it allows.
    #[error("loop minimum {min} exceeds maximum {max}")]
    LoopBounds { min: u32, max: u32 },
    /// A front end could not convert its rule into an element tree.
    #[error("cannot convert rule: {0}")]
    Convert(String),
}

impl ErrorCode for GrammarError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyAlternation => "E_EMPTY_ALTERNATION",
            Self::LoopBounds { .. } => "E_LOOP_BOUNDS",
            Self::Convert(_) => "E_CONVERT",
        }
    }
}

// =============================================================================
// ELEMENTS
// =============================================================================

/// One node of a grammar production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// The empty production.
    Skip,
    /// A terminal string.
    Literal {
        text: String,
        #[serde(default = "case_sensitive_default")]
        case_sensitive: bool,
    },
    /// A reference to another rule by name.
    Rule { name: String },
    /// Elements matched one after the other. Empty is the same as `Skip`.
    Sequence { items: Vec<Element> },
    /// Exactly one of the branches, drawn in order.
    Alternation { branches: Vec<Element> },
    /// `forward` once, then any number of `backward`+`forward` round trips.
    ///
    /// `max == 0` means unbounded.
    Loop {
        forward: Box<Element>,
        backward: Box<Element>,
        #[serde(default)]
        min: u32,
        #[serde(default)]
        max: u32,
    },
    /// Elided content, e.g. a collapsed run of character alternatives.
    Ellipsis,
}

fn case_sensitive_default() -> bool {
    true
}

impl Element {
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal { text: text.into(), case_sensitive: true }
    }

    #[must_use]
    pub fn literal_ci(text: impl Into<String>) -> Self {
        Self::Literal { text: text.into(), case_sensitive: false }
    }

    #[must_use]
    pub fn rule(name: impl Into<String>) -> Self {
        Self::Rule { name: name.into() }
    }

    #[must_use]
    pub fn sequence(items: Vec<Element>) -> Self {
        Self::Sequence { items }
    }

    /// Build an alternation.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptyAlternation`] when `branches` is empty.
    pub fn alternation(branches: Vec<Element>) -> Result<Self, GrammarError> {
        if branches.is_empty() {
            return Err(GrammarError::EmptyAlternation);
        }
        Ok(Self::Alternation { branches })
    }

    /// Build a loop.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::LoopBounds`] when `max > 0` and `min > max`.
    pub fn repeat(forward: Element, backward: Element, min: u32, max: u32) -> Result<Self, GrammarError> {
        check_loop_bounds(min, max)?;
        Ok(Self::Loop { forward: Box::new(forward), backward: Box::new(backward), min, max })
    }

    /// `[ x ]`: `x` or nothing.
    #[must_use]
    pub fn optional(element: Element) -> Self {
        Self::Alternation { branches: vec![Self::Skip, element] }
    }

    /// `{ x }`: zero or more `x`, drawn on the return track.
    #[must_use]
    pub fn zero_or_more(element: Element) -> Self {
        Self::Loop { forward: Box::new(Self::Skip), backward: Box::new(element), min: 0, max: 0 }
    }

    /// `x { x }`: one or more `x`.
    #[must_use]
    pub fn one_or_more(element: Element) -> Self {
        Self::Loop { forward: Box::new(element), backward: Box::new(Self::Skip), min: 1, max: 0 }
    }

    /// Whether this element matches only the empty string.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        match self {
            Self::Skip => true,
            Self::Sequence { items } => items.iter().all(Self::is_skip),
            _ => false,
        }
    }

    /// Check the whole tree for malformed nodes.
    ///
    /// # Errors
    ///
    /// Returns the first [`GrammarError`] found in depth-first order.
    pub fn validate(&self) -> Result<(), GrammarError> {
        match self {
            Self::Skip | Self::Literal { .. } | Self::Rule { .. } | Self::Ellipsis => Ok(()),
            Self::Sequence { items } => items.iter().try_for_each(Self::validate),
            Self::Alternation { branches } => {
                if branches.is_empty() {
                    return Err(GrammarError::EmptyAlternation);
                }
                branches.iter().try_for_each(Self::validate)
            }
            Self::Loop { forward, backward, min, max } => {
                check_loop_bounds(*min, *max)?;
                forward.validate()?;
                backward.validate()
            }
        }
    }
}

pub(crate) fn check_loop_bounds(min: u32, max: u32) -> Result<(), GrammarError> {
    if max > 0 && min > max {
        return Err(GrammarError::LoopBounds { min, max });
    }
    Ok(())
}

// =============================================================================
// RULES AND FRONT-END SEAMS
// =============================================================================

/// A named production, the unit drawn as one diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub element: Element,
}

impl Rule {
    #[must_use]
    pub fn new(name: impl Into<String>, element: Element) -> Self {
        Self { name: name.into(), element }
    }
}

/// Front-end conversion of one parsed rule into an element tree.
pub trait ToElement {
    fn rule_name(&self) -> &str;

    /// # Errors
    ///
    /// Returns a [`GrammarError`] when the rule cannot be represented.
    fn to_element(&self) -> Result<Element, GrammarError>;
}

impl ToElement for Rule {
    fn rule_name(&self) -> &str {
        &self.name
    }

    fn to_element(&self) -> Result<Element, GrammarError> {
        self.element.validate()?;
        Ok(self.element.clone())
    }
}

impl<T: ToElement + ?Sized> ToElement for &T {
    fn rule_name(&self) -> &str {
        (**self).rule_name()
    }

    fn to_element(&self) -> Result<Element, GrammarError> {
        (**self).to_element()
    }
}

/// Optional simplification pass run before layout.
pub trait Prettify {
    fn prettify(&self, element: Element) -> Element;
}

#[cfg(test)]
#[path = "grammar_test.rs"]
mod tests;
