//! Error taxonomy for the rename flow.
//!
//! Every variant is recoverable: the interceptor turns them into a
//! notification and leaves the download's filename alone.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenameError {
    /// Missing or empty credential.
    #[error("{0}")]
    Config(String),
    /// Upstream HTTP, transport, or response-shape failure.
    #[error("API error: {0}")]
    Api(String),
    /// Sanitized name came out empty or unusable.
    #[error("generated filename is invalid: {0}")]
    InvalidName(String),
    /// Undo target has no ledger entry.
    #[error("original filename not found")]
    NotFound,
}

impl RenameError {
    pub fn api(msg: impl Into<String>) -> Self {
        RenameError::Api(msg.into())
    }

    pub fn invalid_name(msg: impl Into<String>) -> Self {
        RenameError::InvalidName(msg.into())
    }
}
