//! `renamr host` – native-messaging host for the browser extension.

use anyhow::Result;
use renamr_core::api::GenerationClient;
use renamr_core::config::{FileSettings, RenamrConfig};
use renamr_core::generator::FilenameGenerator;
use renamr_core::ledger::RenameLedger;
use renamr_core::session;
use std::path::Path;
use std::sync::Arc;

pub async fn run_host(cfg: &RenamrConfig, config_path: &Path, origin: Option<&str>) -> Result<()> {
    // Settings are re-read per download; endpoint settings are fixed for the session.
    let settings = Arc::new(FileSettings::new(config_path));
    let generator = FilenameGenerator::new(GenerationClient::new(&cfg.api_config()));
    let ledger = Arc::new(RenameLedger::new());

    tracing::info!(
        origin = origin.unwrap_or("-"),
        endpoint = generator.client().endpoint(),
        "native messaging host starting"
    );

    session::run(
        tokio::io::stdin(),
        tokio::io::stdout(),
        settings,
        generator,
        ledger,
    )
    .await?;

    tracing::info!("native messaging host exiting");
    Ok(())
}
