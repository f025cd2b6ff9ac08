//! Error type for the paragraph engine.
//!
//! The engine degrades gracefully on every kind of text input, so the only
//! failures are caller contract violations: a paragraph count of zero, or a
//! length selector that names no known length.

use thiserror::Error;

/// Errors returned by `paraform-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The caller passed an argument outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
