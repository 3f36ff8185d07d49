use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/exthash/config.toml`.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtHashConfig {
    /// Base URL of the release-hosting REST API (no trailing slash needed).
    pub api_base_url: String,
    /// `User-Agent` sent with every request; GitHub rejects requests without one.
    pub user_agent: String,
    /// Registry document to update. Relative paths resolve against the working directory.
    pub registry_file: PathBuf,
    /// Connect timeout for API and asset requests, in seconds.
    pub connect_timeout_secs: u64,
    /// Optional API token, sent as `Authorization: Bearer <token>` to raise rate limits.
    pub github_token: Option<String>,
}

impl Default for ExtHashConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            user_agent: "stina-extensions-registry".to_string(),
            registry_file: PathBuf::from("registry.json"),
            connect_timeout_secs: 30,
            github_token: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("exthash")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ExtHashConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ExtHashConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ExtHashConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ExtHashConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
