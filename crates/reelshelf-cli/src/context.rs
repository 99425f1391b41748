use color_eyre::Result;
use movie_catalog_config::{AppConfig, PathManager, SettingsStore};
use movie_catalog_core::CatalogStore;
use movie_catalog_sources::{MetadataLookup, TmdbClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs: resolved paths, config, the loaded catalog and settings
pub struct AppContext {
    pub paths: PathManager,
    pub config: AppConfig,
    pub catalog: CatalogStore,
    pub settings: SettingsStore,
}

impl AppContext {
    pub fn load(data_file_override: Option<PathBuf>) -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = AppConfig::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

        let movies_file = data_file_override.unwrap_or_else(|| config.movies_file(&paths));
        let settings_file = config.settings_file(&paths);
        debug!("Catalog file: {}, settings file: {}", movies_file.display(), settings_file.display());

        let catalog = CatalogStore::open(movies_file);
        let settings = SettingsStore::open(settings_file);

        Ok(Self {
            paths,
            config,
            catalog,
            settings,
        })
    }

    /// TMDB client built from the current API key; unavailable when no key is set
    pub fn lookup_provider(&self) -> Result<Arc<dyn MetadataLookup>> {
        let key = self.settings.api_key().unwrap_or_default();
        let client = TmdbClient::new(key, &self.config.lookup)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create TMDB client: {}", e))?;
        Ok(Arc::new(client))
    }
}
