//! Native-messaging session: one extension connection over a byte stream.
//!
//! Every inbound message is handled in its own task, so name generation for
//! several downloads can be in flight at once. All outbound traffic (replies,
//! host control requests, notifications) funnels through one channel into a
//! single writer task, which keeps frames from interleaving.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::SettingsSource;
use crate::generator::FilenameGenerator;
use crate::host::{DownloadHost, Notification, Notifier};
use crate::interceptor::Interceptor;
use crate::ledger::RenameLedger;
use crate::model::{DownloadEvent, DownloadId, FilenameDecision};
use crate::protocol::{read_frame, write_message, Inbound, Outbound};
use crate::validate::validate_api_key;

/// Host control and notifications expressed as outbound messages. A
/// successful call means the request was queued for the extension.
#[derive(Debug, Clone)]
pub struct ChannelHost {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelHost {
    pub fn new(tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { tx }
    }

    fn send(&self, msg: Outbound) -> Result<()> {
        self.tx
            .send(msg)
            .map_err(|_| anyhow!("extension connection closed"))
    }
}

#[async_trait]
impl DownloadHost for ChannelHost {
    async fn cancel(&self, id: DownloadId) -> Result<()> {
        self.send(Outbound::Cancel { download_id: id })
    }

    async fn start_download(&self, url: &str, filename: &str) -> Result<()> {
        self.send(Outbound::Download {
            url: url.to_string(),
            filename: filename.to_string(),
        })
    }
}

impl Notifier for ChannelHost {
    fn notify(&self, notification: Notification) {
        if self.send(notification.into()).is_err() {
            tracing::debug!("dropping notification: extension connection closed");
        }
    }
}

/// Serves one extension connection until `reader` reaches EOF, then waits
/// for in-flight work and flushes every pending reply.
pub async fn run<R, W>(
    mut reader: R,
    writer: W,
    settings: Arc<dyn SettingsSource>,
    generator: FilenameGenerator,
    ledger: Arc<RenameLedger>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let writer_task = tokio::spawn(write_loop(writer, rx));

    let host = Arc::new(ChannelHost::new(tx.clone()));
    let interceptor = Arc::new(Interceptor::new(
        settings,
        generator,
        ledger,
        host.clone(),
        host,
    ));

    let mut tasks = JoinSet::new();
    let mut outcome = Ok(());
    loop {
        let frame = match read_frame(&mut reader).await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::debug!("extension closed the connection");
                break;
            }
            Err(e) => {
                tracing::warn!("native messaging read failed: {:#}", e);
                outcome = Err(e);
                break;
            }
        };

        let msg: Inbound = match serde_json::from_slice(&frame) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("malformed message: {}", e);
                let _ = tx.send(Outbound::Error {
                    message: format!("malformed message: {e}"),
                });
                continue;
            }
        };

        let interceptor = Arc::clone(&interceptor);
        let tx = tx.clone();
        tasks.spawn(async move {
            let reply = handle(&interceptor, msg).await;
            let _ = tx.send(reply);
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::error!("message handler panicked: {}", e);
        }
    }

    // Last senders go away here; the writer drains and exits.
    drop(interceptor);
    drop(tx);
    writer_task.await.context("writer task panicked")??;

    outcome
}

async fn handle(interceptor: &Interceptor, msg: Inbound) -> Outbound {
    match msg {
        Inbound::DeterminingFilename { id, url, filename } => {
            let event = DownloadEvent { id, url, filename };
            match interceptor.on_determining_filename(&event).await {
                FilenameDecision::Rename(filename) => Outbound::Suggest {
                    download_id: event.id,
                    filename,
                },
                FilenameDecision::Keep => Outbound::Keep {
                    download_id: event.id,
                },
            }
        }
        Inbound::Undo { download_id, url } => {
            let outcome = interceptor.undo(download_id, &url).await;
            Outbound::UndoResult {
                download_id,
                success: outcome.success,
                error: outcome.error,
            }
        }
        Inbound::ValidateKey { api_key } => Outbound::KeyValidation {
            valid: validate_api_key(interceptor.generator().client(), &api_key).await,
        },
    }
}

async fn write_loop<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<Outbound>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(msg) = rx.recv().await {
        write_message(&mut writer, &msg)
            .await
            .context("writing to extension")?;
    }
    Ok(())
}
