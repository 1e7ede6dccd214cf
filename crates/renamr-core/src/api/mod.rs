//! Client for the remote text-generation endpoint.
//!
//! Uses the curl crate (libcurl) for a single POST per call. Requests run on
//! the blocking pool so async callers are never stalled by the transfer.

pub mod wire;

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::RenameError;
use wire::{ErrorEnvelope, GenerateRequest, GenerateResponse};

/// Status line and body of one exchange with the endpoint.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone)]
pub struct GenerationClient {
    endpoint: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl GenerationClient {
    pub fn new(cfg: &ApiConfig) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `prompt` with `api_key` as bearer credential. Exactly one attempt.
    pub async fn post(&self, api_key: &str, prompt: &str) -> Result<RawResponse> {
        let client = self.clone();
        let api_key = api_key.to_string();
        let body = serde_json::to_vec(&GenerateRequest::from_prompt(prompt))?;
        tokio::task::spawn_blocking(move || client.post_blocking(&api_key, &body))
            .await
            .context("generation request task panicked")?
    }

    /// Runs in the current thread; use [`GenerationClient::post`] from async code.
    fn post_blocking(&self, api_key: &str, body: &[u8]) -> Result<RawResponse> {
        let mut response = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.endpoint).context("invalid endpoint URL")?;
        easy.post(true)?;
        easy.post_fields_copy(body)?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append("Content-Type: application/json")?;
        list.append(&format!("Authorization: Bearer {}", api_key))?;
        // No 100-continue round trip; the body is always small.
        list.append("Expect:")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform().context("generation request failed")?;
        }

        let status = easy.response_code().context("no response code")?;
        tracing::debug!(status, bytes = response.len(), "generation endpoint replied");
        Ok(RawResponse {
            status,
            body: response,
        })
    }

    /// Sends `prompt` and returns the first generated text candidate.
    ///
    /// Transport failures, non-2xx statuses (with the upstream `error.message`
    /// when present) and bodies without text all map to `RenameError::Api`.
    pub async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, RenameError> {
        let raw = self
            .post(api_key, prompt)
            .await
            .map_err(|e| RenameError::api(format!("{e:#}")))?;

        if !raw.is_success() {
            let envelope = ErrorEnvelope::parse(&raw.body);
            tracing::warn!(
                status = raw.status,
                rejection = ?envelope.rejection(),
                "generation endpoint returned an error"
            );
            return Err(RenameError::api(
                envelope.message().unwrap_or("Unknown error").to_string(),
            ));
        }

        let parsed: GenerateResponse = serde_json::from_slice(&raw.body)
            .map_err(|_| RenameError::api("invalid API response format"))?;
        parsed
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| RenameError::api("invalid API response format"))
    }
}
