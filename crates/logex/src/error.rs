//! crates/logex/src/error.rs
//! Error types surfaced by level parsing and logger installation.

use thiserror::Error;
use tracing::dispatcher::SetGlobalDefaultError;

/// Error returned when parsing a [`Level`](crate::Level) from a string fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown log level: {input:?}")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Errors produced while installing the process-wide logger.
#[derive(Debug, Error)]
pub enum InitError {
    /// A process logger was already installed, either by an earlier call to
    /// [`init`](crate::init) or lazily by the first logging call.
    #[error("the process logger is already initialized")]
    AlreadyInitialized,
    /// Another tracing dispatcher already owns the global default.
    #[error("failed to install the global tracing dispatcher: {0}")]
    GlobalDefault(#[from] SetGlobalDefaultError),
}
