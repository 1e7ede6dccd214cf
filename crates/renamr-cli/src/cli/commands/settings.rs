//! `renamr settings` – show and update settings.

use anyhow::Result;
use renamr_core::config::{self, redact, RenamrConfig};
use std::path::Path;

/// Fields to change; `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub auto_rename: Option<bool>,
    pub include_date: Option<bool>,
    pub naming_format: Option<String>,
}

impl SettingsUpdate {
    /// Applies the update; returns whether anything changed.
    pub fn apply(self, cfg: &mut RenamrConfig) -> bool {
        let mut changed = false;
        if let Some(v) = self.auto_rename {
            changed |= cfg.auto_rename != v;
            cfg.auto_rename = v;
        }
        if let Some(v) = self.include_date {
            changed |= cfg.include_date != v;
            cfg.include_date = v;
        }
        if let Some(v) = self.naming_format {
            changed |= cfg.naming_format != v;
            cfg.naming_format = v;
        }
        changed
    }
}

pub fn run_settings(mut cfg: RenamrConfig, path: &Path, update: SettingsUpdate) -> Result<()> {
    if update.apply(&mut cfg) {
        config::save_at(path, &cfg)?;
        tracing::info!("settings updated");
    }

    let api = cfg.api_config();
    println!("{:<14} {}", "api_key", redact(&cfg.api_key));
    println!("{:<14} {}", "auto_rename", cfg.auto_rename);
    println!("{:<14} {}", "include_date", cfg.include_date);
    println!("{:<14} {}", "naming_format", cfg.naming_format);
    println!("{:<14} {}", "endpoint", api.endpoint);
    Ok(())
}
