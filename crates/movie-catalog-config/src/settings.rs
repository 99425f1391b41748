use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable holding a default TMDB API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// User settings persisted in `settings.json`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Settings {
    pub dark_mode: bool,
    pub tmdb_api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            tmdb_api_key: String::new(),
        }
    }
}

impl Settings {
    /// Read settings leniently: a missing or unreadable file, or one that is
    /// not a JSON object, yields defaults. `dark_mode` is read by truthiness;
    /// a non-string API key keeps the default.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("Settings file {} does not exist, using defaults", path.display());
            return Self::default();
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str::<Value>(&content).map_err(|e| e.to_string()));

        let document = match parsed {
            Ok(document) => document,
            Err(e) => {
                warn!("Ignoring unreadable settings file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        let Some(fields) = document.as_object() else {
            warn!("Settings file {} is not a JSON object, using defaults", path.display());
            return Self::default();
        };

        let defaults = Self::default();
        Self {
            dark_mode: fields.get("dark_mode").map(truthy).unwrap_or(defaults.dark_mode),
            tmdb_api_key: fields
                .get("tmdb_api_key")
                .and_then(Value::as_str)
                .map(|key| key.trim().to_string())
                .unwrap_or(defaults.tmdb_api_key),
        }
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// JSON truthiness: zero, empty and null are false
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Null => false,
    }
}

/// Settings bound to their file, with the environment API key applied.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            settings: Settings::default(),
        }
    }

    /// Load settings from `path`, preferring `TMDB_API_KEY` from the environment
    pub fn open(path: PathBuf) -> Self {
        let env_key = std::env::var(API_KEY_ENV).ok();
        Self::open_with_env_key(path, env_key)
    }

    /// Load settings from `path`.
    ///
    /// A non-blank `env_key` wins; the key stored in the file is only used
    /// when no environment key was supplied.
    pub fn open_with_env_key(path: PathBuf, env_key: Option<String>) -> Self {
        let mut store = Self::new(path);
        store.load();

        if let Some(key) = env_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            debug!("Using TMDB API key from {}", API_KEY_ENV);
            store.settings.tmdb_api_key = key;
        }
        store
    }

    pub fn load(&mut self) {
        self.settings = Settings::load(&self.path);
    }

    pub fn save(&self) -> Result<()> {
        self.settings.save(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn dark_mode(&self) -> bool {
        self.settings.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.settings.dark_mode = dark_mode;
    }

    /// Flip the theme and return the new value
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.settings.dark_mode
    }

    /// Configured TMDB API key, if any
    pub fn api_key(&self) -> Option<&str> {
        let key = self.settings.tmdb_api_key.as_str();
        (!key.is_empty()).then_some(key)
    }

    pub fn set_api_key(&mut self, key: &str) {
        self.settings.tmdb_api_key = key.trim().to_string();
    }
}
