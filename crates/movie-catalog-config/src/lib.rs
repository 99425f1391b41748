pub mod config;
pub mod paths;
pub mod settings;

pub use config::{AppConfig, CatalogConfig, LookupConfig, DEFAULT_LOOKUP_TIMEOUT_SECS};
pub use paths::{base_path_override, PathManager};
pub use settings::{Settings, SettingsStore, API_KEY_ENV};
