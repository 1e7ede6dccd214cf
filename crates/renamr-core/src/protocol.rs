//! Browser native-messaging wire format.
//!
//! Each frame is a 32-bit length in native byte order followed by that many
//! bytes of UTF-8 JSON. Browsers refuse host-to-browser frames over 1 MiB.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::host::Notification;
use crate::model::DownloadId;

/// Largest frame a host may send to the browser.
pub const MAX_OUTBOUND_FRAME: usize = 1024 * 1024;

/// Inbound frames above this are treated as a broken stream.
pub const MAX_INBOUND_FRAME: usize = 64 * 1024 * 1024;

/// Messages from the extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Inbound {
    /// The browser is deciding a download's filename.
    DeterminingFilename {
        id: DownloadId,
        url: String,
        filename: String,
    },
    #[serde(rename_all = "camelCase")]
    Undo { download_id: DownloadId, url: String },
    #[serde(rename_all = "camelCase")]
    ValidateKey { api_key: String },
}

/// Messages to the extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Outbound {
    #[serde(rename_all = "camelCase")]
    Suggest {
        download_id: DownloadId,
        filename: String,
    },
    #[serde(rename_all = "camelCase")]
    Keep { download_id: DownloadId },
    Error { message: String },
    #[serde(rename_all = "camelCase")]
    UndoResult {
        download_id: DownloadId,
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Cancel { download_id: DownloadId },
    Download { url: String, filename: String },
    KeyValidation { valid: bool },
}

impl From<Notification> for Outbound {
    fn from(n: Notification) -> Self {
        match n {
            Notification::Error { message } => Outbound::Error { message },
        }
    }
}

/// Reads one frame. Returns `Ok(None)` on EOF before the first byte of the
/// length prefix; EOF anywhere later is an error.
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        let n = reader
            .read(&mut len_buf[filled..])
            .await
            .context("reading frame length")?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            bail!("stream ended inside a frame length ({} of 4 bytes)", filled);
        }
        filled += n;
    }
    let len = u32::from_ne_bytes(len_buf) as usize;
    if len > MAX_INBOUND_FRAME {
        bail!("inbound frame of {} bytes exceeds limit", len);
    }
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .await
        .context("reading frame body")?;
    Ok(Some(buf))
}

/// Serializes `msg` and writes it as one frame.
pub async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, msg: &Outbound) -> Result<()> {
    let body = serde_json::to_vec(msg)?;
    if body.len() > MAX_OUTBOUND_FRAME {
        bail!("outbound message of {} bytes exceeds 1 MiB", body.len());
    }
    writer
        .write_all(&(body.len() as u32).to_ne_bytes())
        .await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_undo_uses_camel_case_fields() {
        let msg: Inbound =
            serde_json::from_str(r#"{"action":"undo","downloadId":42,"url":"https://e.x/f"}"#)
                .unwrap();
        assert_eq!(
            msg,
            Inbound::Undo {
                download_id: DownloadId(42),
                url: "https://e.x/f".into()
            }
        );
    }

    #[test]
    fn inbound_determining_filename() {
        let msg: Inbound = serde_json::from_str(
            r#"{"action":"determiningFilename","id":3,"url":"https://e.x/r.pdf","filename":"r.pdf"}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            Inbound::DeterminingFilename {
                id: DownloadId(3),
                url: "https://e.x/r.pdf".into(),
                filename: "r.pdf".into()
            }
        );
    }

    #[test]
    fn inbound_validate_key() {
        let msg: Inbound =
            serde_json::from_str(r#"{"action":"validateKey","apiKey":"abc"}"#).unwrap();
        assert_eq!(msg, Inbound::ValidateKey { api_key: "abc".into() });
    }

    #[test]
    fn outbound_shapes() {
        let v = serde_json::to_value(Outbound::UndoResult {
            download_id: DownloadId(1),
            success: true,
            error: None,
        })
        .unwrap();
        assert_eq!(
            v,
            serde_json::json!({ "type": "undoResult", "downloadId": 1, "success": true })
        );

        let v = serde_json::to_value(Outbound::from(Notification::Error {
            message: "x".into(),
        }))
        .unwrap();
        assert_eq!(v, serde_json::json!({ "type": "error", "message": "x" }));
    }

    #[tokio::test]
    async fn frame_round_trip_over_pipe() {
        let (mut a, mut b) = tokio::io::duplex(4096);
        let msg = Outbound::Keep {
            download_id: DownloadId(9),
        };
        write_message(&mut a, &msg).await.unwrap();
        drop(a);

        let frame = read_frame(&mut b).await.unwrap().unwrap();
        let back: Outbound = serde_json::from_slice(&frame).unwrap();
        assert_eq!(back, msg);
        assert!(read_frame(&mut b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn truncated_body_is_error() {
        let (mut a, mut b) = tokio::io::duplex(64);
        a.write_all(&10u32.to_ne_bytes()).await.unwrap();
        a.write_all(b"{}").await.unwrap();
        drop(a);
        assert!(read_frame(&mut b).await.is_err());
    }

    #[tokio::test]
    async fn truncated_length_prefix_is_error() {
        let (mut a, mut b) = tokio::io::duplex(64);
        a.write_all(&[5, 0]).await.unwrap();
        drop(a);
        assert!(read_frame(&mut b).await.is_err());
    }

    #[tokio::test]
    async fn empty_stream_is_clean_eof() {
        let (a, mut b) = tokio::io::duplex(64);
        drop(a);
        assert!(read_frame(&mut b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn oversized_outbound_rejected() {
        let (mut a, _b) = tokio::io::duplex(64);
        let msg = Outbound::Error {
            message: "x".repeat(MAX_OUTBOUND_FRAME + 1),
        };
        assert!(write_message(&mut a, &msg).await.is_err());
    }
}
