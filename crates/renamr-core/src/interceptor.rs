//! Download interception and undo.
//!
//! Renaming is fail-open: whatever goes wrong, the host keeps its own
//! filename and the user gets a notification. Undo is a best-effort
//! cancel-and-redownload under the original name.

use std::sync::Arc;

use crate::config::SettingsSource;
use crate::error::RenameError;
use crate::generator::FilenameGenerator;
use crate::host::{DownloadHost, Notification, Notifier};
use crate::ledger::RenameLedger;
use crate::model::{DownloadEvent, DownloadId, FilenameDecision, UndoOutcome};

pub struct Interceptor {
    settings: Arc<dyn SettingsSource>,
    generator: FilenameGenerator,
    ledger: Arc<RenameLedger>,
    host: Arc<dyn DownloadHost>,
    notifier: Arc<dyn Notifier>,
}

impl Interceptor {
    pub fn new(
        settings: Arc<dyn SettingsSource>,
        generator: FilenameGenerator,
        ledger: Arc<RenameLedger>,
        host: Arc<dyn DownloadHost>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            generator,
            ledger,
            host,
            notifier,
        }
    }

    pub fn generator(&self) -> &FilenameGenerator {
        &self.generator
    }

    pub fn ledger(&self) -> &Arc<RenameLedger> {
        &self.ledger
    }

    /// Called when the host is deciding `event`'s filename.
    pub async fn on_determining_filename(&self, event: &DownloadEvent) -> FilenameDecision {
        let settings = match self.settings.snapshot() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(id = %event.id, "cannot read settings: {:#}", e);
                self.report_failure(&format!("{e:#}"));
                return FilenameDecision::Keep;
            }
        };

        if !settings.auto_rename || settings.api_key.is_empty() {
            tracing::debug!(id = %event.id, "auto-rename disabled or API key missing");
            return FilenameDecision::Keep;
        }

        match self.generator.generate(event, &settings).await {
            Ok(name) => {
                self.ledger.record(event.id, event.filename.clone());
                tracing::info!(id = %event.id, from = %event.filename, to = %name, "renaming download");
                FilenameDecision::Rename(name)
            }
            Err(e) => {
                tracing::warn!(id = %event.id, "rename failed: {}", e);
                self.report_failure(&e.to_string());
                FilenameDecision::Keep
            }
        }
    }

    fn report_failure(&self, reason: &str) {
        self.notifier.notify(Notification::Error {
            message: format!("Failed to rename file: {reason}"),
        });
    }

    /// Restores the original filename of a renamed download by cancelling it
    /// and fetching `url` again under the old name.
    ///
    /// If the host rejects either step the ledger entry is put back, so the
    /// undo can be retried.
    pub async fn undo(&self, id: DownloadId, url: &str) -> UndoOutcome {
        let Some(original) = self.ledger.take(id) else {
            tracing::debug!(%id, "no original filename recorded");
            return UndoOutcome::failed(RenameError::NotFound.to_string());
        };

        tracing::info!(%id, to = %original, "undoing rename");
        let restored: anyhow::Result<()> = async {
            self.host.cancel(id).await?;
            self.host.start_download(url, &original).await
        }
        .await;

        match restored {
            Ok(()) => UndoOutcome::restored(),
            Err(e) => {
                tracing::warn!(%id, "undo failed: {:#}", e);
                self.ledger.record(id, original);
                UndoOutcome::failed(format!("failed to restore original filename: {e:#}"))
            }
        }
    }
}
