use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::insight::TipSettings;

/// Overrides the config file location.
pub(crate) const CONFIG_ENV: &str = "BILLBOOK_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) storage: StorageSection,
    pub(crate) insight: InsightSection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Backend {
    #[default]
    Sqlite,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StorageSection {
    pub(crate) backend: Backend,
    /// sqlite: database file. json: data directory. Defaults to the platform data dir.
    pub(crate) path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct InsightSection {
    pub(crate) model: String,
    pub(crate) base_url: String,
    /// Name of the environment variable holding the API key.
    pub(crate) api_key_env: String,
    pub(crate) timeout_secs: u64,
    pub(crate) max_entries: usize,
}

impl Default for InsightSection {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 15,
            max_entries: 50,
        }
    }
}

impl InsightSection {
    pub(crate) fn tip_settings(&self) -> TipSettings {
        TipSettings {
            max_entries: self.max_entries,
            timeout: std::time::Duration::from_secs(self.timeout_secs),
        }
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "billbook", "billbook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
}

pub(crate) fn config_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(p));
    }
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Load the config at `path`; a missing file means defaults.
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

/// Where the store lives: the configured path, or the platform data dir.
pub(crate) fn storage_path(storage: &StorageSection) -> Result<PathBuf> {
    if let Some(p) = &storage.path {
        return Ok(p.clone());
    }
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(match storage.backend {
        Backend::Sqlite => data_dir.join("billbook.db"),
        Backend::Json => data_dir.join("data"),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
