//! Filesystem locations for Myflix configuration and data.
//!
//! ```text
//! ~/.config/myflix/
//! └── config.toml       # MyflixConfig
//!
//! ~/.local/share/myflix/
//! └── storage.json      # key-value store (credentials, profiles, collections)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "myflix";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for myflix_core::MyflixError {
    fn from(err: PathError) -> Self {
        myflix_core::MyflixError::config(err.to_string())
    }
}

pub struct MyflixPaths;

impl MyflixPaths {
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Path of the key-value store file.
    ///
    /// # Security Note
    ///
    /// The store holds account secrets in plaintext. Keep the data directory
    /// private to the user.
    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_app_dirs() {
        if let (Ok(config), Ok(storage)) = (MyflixPaths::config_file(), MyflixPaths::storage_file()) {
            assert!(config.ends_with("myflix/config.toml"));
            assert!(storage.ends_with("myflix/storage.json"));
        }
    }
}
