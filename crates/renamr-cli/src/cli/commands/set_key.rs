//! `renamr set-key <key>` – validate, then store the API key.

use anyhow::{bail, Result};
use renamr_core::api::GenerationClient;
use renamr_core::config::{self, RenamrConfig};
use renamr_core::validate::validate_api_key;
use std::path::Path;

pub async fn run_set_key(mut cfg: RenamrConfig, path: &Path, key: &str) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        bail!("API key cannot be empty");
    }
    let client = GenerationClient::new(&cfg.api_config());
    if !validate_api_key(&client, key).await {
        bail!("invalid API key; nothing was saved");
    }
    cfg.api_key = key.to_string();
    config::save_at(path, &cfg)?;
    tracing::info!("stored new API key");
    println!("API key validated and saved to {}", path.display());
    Ok(())
}
