//! Download-side value types shared by the interceptor, ledger and protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle the host download manager assigns to a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(pub u64);

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A download at the moment the host asks for its final filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEvent {
    pub id: DownloadId,
    pub url: String,
    /// Filename the host would use if nobody intervenes.
    pub filename: String,
}

/// Answer to the host's "what should this file be called?" question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameDecision {
    /// Leave the host's filename untouched.
    Keep,
    Rename(String),
}

/// Structured result of an undo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl UndoOutcome {
    pub fn restored() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}
