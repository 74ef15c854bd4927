//! Per-rule output pipeline.
//!
//! DESIGN
//! ======
//! Rules are drawn one at a time: convert, optionally prettify, lay out,
//! render, write. A rule that fails at any stage is logged with its error
//! code and skipped; the remaining rules are still drawn. Only a failure to
//! write the output stream stops the run.

use std::io::{self, Write};

use crate::config::RenderConfig;
use crate::error::ErrorCode;
use crate::grammar::{Element, GrammarError, Prettify, ToElement};
use crate::layout::{LayoutError, layout};
use crate::render::{RenderError, render};
use crate::sizing::Sizing;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The front end could not produce a valid element tree.
    #[error("convert: {0}")]
    Convert(#[from] GrammarError),
    #[error("layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("render: {0}")]
    Render(#[from] RenderError),
}

impl ErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Convert(e) => e.error_code(),
            Self::Layout(e) => e.error_code(),
            Self::Render(e) => e.error_code(),
        }
    }
}

/// Outcome counts for one [`write_rules`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rendered: usize,
    pub failed: usize,
}

/// Lay out and render a single element.
///
/// # Errors
///
/// Returns [`RuleError::Layout`] or [`RuleError::Render`].
pub fn diagram(element: &Element, config: &RenderConfig, sizing: &dyn Sizing) -> Result<Vec<String>, RuleError> {
    let node = layout(element, sizing, config.direction)?;
    Ok(render(&node, config.direction)?)
}

/// Header line, indented diagram lines, blank separator.
///
/// Empty diagram lines stay empty rather than becoming indent-only.
#[must_use]
pub fn format_block(name: &str, lines: &[String], indent: usize) -> String {
    let pad = " ".repeat(indent);
    let body: usize = lines.iter().map(|l| l.len() + indent + 1).sum();
    let mut block = String::with_capacity(name.len() + 2 + body + 1);

    block.push_str(name);
    block.push_str(":\n");
    for line in lines {
        if !line.is_empty() {
            block.push_str(&pad);
            block.push_str(line);
        }
        block.push('\n');
    }
    block.push('\n');
    block
}

/// Draw every rule to `out`.
///
/// # Errors
///
/// Only I/O errors from `out`. Rule failures are logged and counted in the
/// returned [`Summary`].
pub fn write_rules<W, I>(
    out: &mut W,
    rules: I,
    config: &RenderConfig,
    sizing: &dyn Sizing,
    prettifier: Option<&dyn Prettify>,
) -> io::Result<Summary>
where
    W: Write,
    I: IntoIterator,
    I::Item: ToElement,
{
    let mut summary = Summary::default();

    for rule in rules {
        let name = rule.rule_name();
        match draw_rule(&rule, config, sizing, prettifier) {
            Ok(lines) => {
                out.write_all(format_block(name, &lines, config.indent).as_bytes())?;
                tracing::debug!(rule = name, lines = lines.len(), "rule drawn");
                summary.rendered += 1;
            }
            Err(e) => {
                tracing::error!(rule = name, code = e.error_code(), error = %e, "rule skipped");
                summary.failed += 1;
            }
        }
    }

    out.flush()?;
    Ok(summary)
}

fn draw_rule<R: ToElement>(
    rule: &R,
    config: &RenderConfig,
    sizing: &dyn Sizing,
    prettifier: Option<&dyn Prettify>,
) -> Result<Vec<String>, RuleError> {
    let mut element = rule.to_element()?;
    if let Some(prettifier) = prettifier.filter(|_| config.prettify) {
        element = prettifier.prettify(element);
    }
    diagram(&element, config, sizing)
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
