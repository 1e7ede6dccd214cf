//! `renamr validate-key [key]` – check a key without storing it.

use anyhow::{bail, Result};
use renamr_core::api::GenerationClient;
use renamr_core::config::RenamrConfig;
use renamr_core::validate::validate_api_key;

pub async fn run_validate_key(cfg: &RenamrConfig, key: Option<&str>) -> Result<()> {
    let key = key.unwrap_or(cfg.api_key.as_str());
    if key.is_empty() {
        bail!("no API key given and none stored; see `renamr set-key`");
    }
    let client = GenerationClient::new(&cfg.api_config());
    if validate_api_key(&client, key).await {
        println!("valid");
        Ok(())
    } else {
        bail!("API key is invalid")
    }
}
