//! Seams to the host browser: download control and user notifications.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::DownloadId;

/// Download operations the host exposes for undo.
#[async_trait]
pub trait DownloadHost: Send + Sync {
    async fn cancel(&self, id: DownloadId) -> Result<()>;
    async fn start_download(&self, url: &str, filename: &str) -> Result<()>;
}

/// One-way message to whatever UI is listening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Notification {
    Error { message: String },
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
