use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::PathManager;

pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 12;

/// Application config read from `config.toml`.
///
/// Every section is optional; an absent file means all defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Override for the movies file (default: `<data dir>/movies.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Override for the settings file (default: `<data dir>/settings.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,
}

/// TMDB lookup options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix joined with TMDB's `poster_path`
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_SECS
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.lookup.timeout_secs == 0 {
            return Err(anyhow::anyhow!("lookup.timeout_secs must be greater than zero"));
        }
        if self.lookup.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("lookup.base_url cannot be empty"));
        }
        if self.lookup.image_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("lookup.image_base_url cannot be empty"));
        }
        Ok(())
    }

    pub fn movies_file(&self, paths: &PathManager) -> PathBuf {
        self.catalog
            .data_file
            .clone()
            .unwrap_or_else(|| paths.movies_file())
    }

    pub fn settings_file(&self, paths: &PathManager) -> PathBuf {
        self.catalog
            .settings_file
            .clone()
            .unwrap_or_else(|| paths.settings_file())
    }
}
