//! `renamr suggest <url>` – one-off name generation.

use anyhow::{Context, Result};
use renamr_core::api::GenerationClient;
use renamr_core::config::RenamrConfig;
use renamr_core::generator::FilenameGenerator;
use renamr_core::model::{DownloadEvent, DownloadId};
use renamr_core::naming;

pub async fn run_suggest(cfg: &RenamrConfig, url: &str, filename: Option<&str>) -> Result<()> {
    let filename = match filename {
        Some(f) => f.to_string(),
        None => naming::filename_from_url_path(url)
            .context("cannot derive a filename from the URL; pass --filename")?,
    };
    let event = DownloadEvent {
        id: DownloadId(0),
        url: url.to_string(),
        filename,
    };

    let generator = FilenameGenerator::new(GenerationClient::new(&cfg.api_config()));
    let name = generator.generate(&event, &cfg.settings()).await?;
    println!("{name}");
    Ok(())
}
