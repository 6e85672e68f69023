//! Centralized error types for mdmail.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mdmail library.
///
/// Every variant is fatal for the invocation: the filter fails closed
/// and the caller must not emit any output for the message.
#[derive(Error, Debug)]
pub enum FilterError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input is not a well-formed RFC 5322 / MIME message.
    #[error("Input is not a well-formed email: {0}")]
    Parse(String),

    /// Markdown-to-HTML conversion failed.
    #[error("Markdown rendering failed: {0}")]
    Render(String),

    /// The rebuilt message could not be serialized.
    #[error("Failed to write outgoing message: {0}")]
    Compose(#[source] std::io::Error),
}

/// Convenience alias for `Result<T, FilterError>`.
pub type Result<T> = std::result::Result<T, FilterError>;

impl FilterError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
