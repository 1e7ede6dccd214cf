//! CLI for renamr.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use renamr_core::config;

use commands::{run_host, run_set_key, run_settings, run_suggest, run_validate_key, SettingsUpdate};

/// Top-level CLI for renamr.
#[derive(Debug, Parser)]
#[command(name = "renamr")]
#[command(about = "renamr: AI-suggested, undoable names for browser downloads", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Serve the browser extension over native messaging (stdin/stdout).
    Host {
        /// Origin of the calling extension; browsers pass it as the first argument.
        origin: Option<String>,
    },

    /// Ask the model for a name for one download and print it.
    Suggest {
        /// URL the file is downloaded from.
        url: String,
        /// Original filename (defaults to the URL's last path segment).
        #[arg(long)]
        filename: Option<String>,
    },

    /// Check an API key against the generation endpoint.
    ValidateKey {
        /// Key to check (defaults to the stored key).
        key: Option<String>,
    },

    /// Validate an API key and store it if the endpoint accepts it.
    SetKey {
        /// The API key.
        key: String,
    },

    /// Show settings, updating any that are given.
    Settings {
        /// Rename downloads automatically as they start.
        #[arg(long, value_name = "BOOL")]
        auto_rename: Option<bool>,
        /// Append the current date to generated names.
        #[arg(long, value_name = "BOOL")]
        include_date: Option<bool>,
        /// Naming template passed to the model.
        #[arg(long, value_name = "TEMPLATE")]
        format: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let path = config::config_path()?;
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Host { origin } => run_host(&cfg, &path, origin.as_deref()).await?,
            CliCommand::Suggest { url, filename } => {
                run_suggest(&cfg, &url, filename.as_deref()).await?
            }
            CliCommand::ValidateKey { key } => run_validate_key(&cfg, key.as_deref()).await?,
            CliCommand::SetKey { key } => run_set_key(cfg, &path, &key).await?,
            CliCommand::Settings {
                auto_rename,
                include_date,
                format,
            } => {
                let update = SettingsUpdate {
                    auto_rename,
                    include_date,
                    naming_format: format,
                };
                run_settings(cfg, &path, update)?
            }
        }

        Ok(())
    }
}
