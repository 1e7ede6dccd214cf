use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default generation endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Default naming template handed to the model.
pub const DEFAULT_NAMING_FORMAT: &str = "Title - Source - Date";

/// Remote endpoint parameters (optional `[api]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Full URL of the generateContent endpoint.
    pub endpoint: String,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Per-operation view of the user's settings. Read fresh for every download.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub api_key: String,
    pub auto_rename: bool,
    pub include_date: bool,
    pub naming_format: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &redact(&self.api_key))
            .field("auto_rename", &self.auto_rename)
            .field("include_date", &self.include_date)
            .field("naming_format", &self.naming_format)
            .finish()
    }
}

/// Renders a key as `<unset>` or `<redacted>` so it never reaches logs.
pub fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Global configuration loaded from `~/.config/renamr/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenamrConfig {
    /// Bearer credential for the generation endpoint. Empty disables renaming.
    pub api_key: String,
    /// Rename downloads as they start.
    pub auto_rename: bool,
    /// Append ` (YYYY-MM-DD)` to generated names.
    pub include_date: bool,
    /// Free-text template passed to the model as guidance.
    pub naming_format: String,
    /// Optional endpoint overrides; if missing, built-in defaults are used.
    pub api: Option<ApiConfig>,
}

impl Default for RenamrConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auto_rename: false,
            include_date: true,
            naming_format: DEFAULT_NAMING_FORMAT.to_string(),
            api: None,
        }
    }
}

impl fmt::Debug for RenamrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenamrConfig")
            .field("settings", &self.settings())
            .field("api", &self.api)
            .finish()
    }
}

impl RenamrConfig {
    pub fn settings(&self) -> Settings {
        Settings {
            api_key: self.api_key.clone(),
            auto_rename: self.auto_rename,
            include_date: self.include_date,
            naming_format: self.naming_format.clone(),
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }
}

/// Source of settings snapshots. Implementations must not cache: values can
/// change between downloads.
pub trait SettingsSource: Send + Sync {
    fn snapshot(&self) -> Result<Settings>;
}

/// A fixed snapshot; handy for one-shot commands and tests.
impl SettingsSource for Settings {
    fn snapshot(&self) -> Result<Settings> {
        Ok(self.clone())
    }
}

/// Re-reads the config file on every snapshot.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsSource for FileSettings {
    fn snapshot(&self) -> Result<Settings> {
        Ok(load_at(&self.path)?.settings())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("renamr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RenamrConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RenamrConfig::default();
        save_at(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_at(&path)
}

pub fn load_at(path: &Path) -> Result<RenamrConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: RenamrConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

/// Write `cfg` to `path`. The file holds the API key, so on unix it is
/// created owner-readable only.
pub fn save_at(path: &Path, cfg: &RenamrConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("writing config {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}
