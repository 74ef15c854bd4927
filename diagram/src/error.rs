//! Error codes shared by every error type in the crate.
//!
//! Each module owns its own `thiserror` enum; this trait gives them all a
//! stable, grepable code so per-rule failures can be logged uniformly by the
//! output pipeline.

/// Grepable error code attached to an error value.
///
/// Rendering is deterministic, so no error here is ever worth retrying; the
/// only fix is upstream (the grammar or the configuration).
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}
