//! Render configuration.
//!
//! One explicit value threaded through the output pipeline. Front ends and
//! the CLI build it; nothing in the crate reads process-wide state.

use std::str::FromStr;

use crate::error::ErrorCode;
use crate::typeset::Direction;

/// Columns each diagram line is indented by in the output.
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown direction `{0}`; expected `ltr` or `rtl`")]
    UnknownDirection(String),
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDirection(_) => "E_UNKNOWN_DIRECTION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Flow direction of every diagram.
    pub direction: Direction,
    /// Run the prettify pass before layout, when one is supplied.
    pub prettify: bool,
    /// Columns prefixed to each diagram line.
    pub indent: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { direction: Direction::Ltr, prettify: false, indent: DEFAULT_INDENT }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            _ => Err(ConfigError::UnknownDirection(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
