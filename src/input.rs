//! JSON grammar front end.
//!
//! A grammar document is `{ "rules": [ { "name": ..., "element": ... } ] }`.
//! Each rule's element is kept as raw JSON until it is drawn, so one
//! malformed rule is reported on its own instead of rejecting the document.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use diagram::{Element, GrammarError, ToElement};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read grammar: {0}")]
    Io(#[from] io::Error),
    #[error("invalid grammar document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no rule named `{0}` in the grammar")]
    UnknownRule(String),
    #[error("cannot write diagrams: {0}")]
    Output(io::Error),
}

#[derive(Debug, Deserialize)]
pub struct Grammar {
    pub rules: Vec<JsonRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRule {
    pub name: String,
    pub element: Value,
}

impl ToElement for JsonRule {
    fn rule_name(&self) -> &str {
        &self.name
    }

    fn to_element(&self) -> Result<Element, GrammarError> {
        let element = Element::deserialize(&self.element).map_err(|e| GrammarError::Convert(e.to_string()))?;
        element.validate()?;
        Ok(element)
    }
}

/// Read a grammar from `path`, or from stdin when no path is given.
pub fn read_grammar(path: Option<&Path>) -> Result<Grammar, CliError> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    parse_grammar(&text)
}

pub fn parse_grammar(text: &str) -> Result<Grammar, CliError> {
    Ok(serde_json::from_str(text)?)
}

/// Keep the rules named in `names`, in document order. No names keeps all.
pub fn select_rules(rules: Vec<JsonRule>, names: &[String]) -> Result<Vec<JsonRule>, CliError> {
    if names.is_empty() {
        return Ok(rules);
    }
    if let Some(missing) = names.iter().find(|name| !rules.iter().any(|r| &r.name == *name)) {
        return Err(CliError::UnknownRule(missing.clone()));
    }
    Ok(rules.into_iter().filter(|r| names.contains(&r.name)).collect())
}

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;
