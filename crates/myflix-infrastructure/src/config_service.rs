//! Configuration service implementation.
//!
//! Loads [`MyflixConfig`] from `config.toml`, writing a default file on first
//! run. `MYFLIX_API_BASE_URL` overrides the metadata-service endpoint.

use crate::paths::MyflixPaths;
use myflix_core::config::MyflixConfig;
use myflix_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_BASE_URL_ENV: &str = "MYFLIX_API_BASE_URL";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the platform config file.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: MyflixPaths::config_file()?,
        })
    }

    /// Uses an explicit config file (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration, creating the file with defaults if missing.
    pub fn load(&self) -> Result<MyflixConfig> {
        let mut config = if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            toml::from_str::<MyflixConfig>(&content)?
        } else {
            let config = MyflixConfig::default();
            self.save(&config)?;
            tracing::info!("Created default config at {}", self.path.display());
            config
        };

        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("{} overrides api_base_url", API_BASE_URL_ENV);
                config.api_base_url = url;
            }
        }

        Ok(config)
    }

    pub fn save(&self, config: &MyflixConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(config)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myflix_core::MyflixError;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("myflix/config.toml"));

        let config = service.load().unwrap();
        assert_eq!(config.cache_ttl(), Duration::from_secs(120));
        assert_eq!(config.language, "ko-KR");
        assert!(service.path().exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "language = \"en-US\"\nmax_feed_pages = 3\n").unwrap();

        let config = ConfigService::with_path(&path).load().unwrap();
        assert_eq!(config.language, "en-US");
        assert_eq!(config.max_feed_pages, 3);
        assert_eq!(config.search_history_limit, 20);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "language = ").unwrap();

        let err = ConfigService::with_path(&path).load().unwrap_err();
        assert!(matches!(err, MyflixError::Serialization { .. }));
    }
}
