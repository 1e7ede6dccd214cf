//! API key validation: a shape check, then one throwaway generation call.

use crate::api::wire::{ErrorEnvelope, GenerateResponse, Rejection};
use crate::api::GenerationClient;

/// Prompt used for the validation round trip.
pub const VALIDATION_PROMPT: &str = "Test API key validation";

const MIN_KEY_LEN: usize = 20;

/// True if `key` is at least 20 characters of `[A-Za-z0-9_-]`.
pub fn is_well_formed(key: &str) -> bool {
    key.len() >= MIN_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Returns true only if the endpoint accepts `api_key` and answers with text.
///
/// Malformed keys are rejected without touching the network. Every failure
/// (rejection, transport error, odd body) is reported as `false`.
pub async fn validate_api_key(client: &GenerationClient, api_key: &str) -> bool {
    if api_key.is_empty() {
        tracing::debug!("api key is empty");
        return false;
    }
    if !is_well_formed(api_key) {
        tracing::debug!("api key format is invalid");
        return false;
    }

    let raw = match client.post(api_key, VALIDATION_PROMPT).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("api key validation request failed: {:#}", e);
            return false;
        }
    };

    if !raw.is_success() {
        match ErrorEnvelope::parse(&raw.body).rejection() {
            Rejection::Unauthenticated => {
                tracing::info!("api key rejected: authentication failed")
            }
            Rejection::PermissionDenied => {
                tracing::info!("api key rejected: missing permissions")
            }
            Rejection::Other => tracing::info!(status = raw.status, "api key rejected"),
        }
        return false;
    }

    match serde_json::from_slice::<GenerateResponse>(&raw.body) {
        Ok(parsed) if parsed.first_text().is_some() => {
            tracing::debug!("api key validated");
            true
        }
        _ => {
            tracing::warn!("unexpected response format during key validation");
            false
        }
    }
}
