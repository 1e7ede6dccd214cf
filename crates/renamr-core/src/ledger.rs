//! In-memory record of original filenames, keyed by download id, for undo.
//!
//! One ledger is built at startup and shared by `Arc` between the rename and
//! undo paths. Entries live until taken or the process exits.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::model::DownloadId;

#[derive(Debug, Default)]
pub struct RenameLedger {
    originals: Mutex<HashMap<DownloadId, String>>,
}

impl RenameLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<DownloadId, String>> {
        // The map stays consistent even if a holder panicked mid-insert.
        self.originals.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Remember `original` as the pre-rename filename of `id`. Overwrites.
    pub fn record(&self, id: DownloadId, original: impl Into<String>) {
        self.lock().insert(id, original.into());
    }

    /// Remove and return the original filename of `id`, if recorded.
    pub fn take(&self, id: DownloadId) -> Option<String> {
        self.lock().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
