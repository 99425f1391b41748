use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override taken from `REELSHELF_BASE_PATH`, if set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("REELSHELF_BASE_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelshelf");

        Ok(Self::from_base(base_dir))
    }

    /// Config files directly under `base`, data and logs in subdirectories
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn movies_file(&self) -> PathBuf {
        self.data_dir.join("movies.json")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("reelshelf.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform config dir (e.g. ~/.config/reelshelf on Linux), else the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(".reelshelf"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_layout() {
        let paths = PathManager::from_base("/srv/reelshelf");
        assert_eq!(paths.config_file(), PathBuf::from("/srv/reelshelf/config.toml"));
        assert_eq!(paths.movies_file(), PathBuf::from("/srv/reelshelf/data/movies.json"));
        assert_eq!(paths.settings_file(), PathBuf::from("/srv/reelshelf/data/settings.json"));
        assert_eq!(paths.log_file(), PathBuf::from("/srv/reelshelf/logs/reelshelf.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("app"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
