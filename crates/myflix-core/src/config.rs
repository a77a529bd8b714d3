//! Configuration model.
//!
//! `MyflixConfig` is stored as TOML (see `myflix_infrastructure::ConfigService`).
//! Every field has a default so partial files stay loadable.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_LANGUAGE: &str = "ko-KR";

/// Root configuration for the catalog layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MyflixConfig {
    /// Base URL of the metadata service.
    pub api_base_url: String,
    /// Prefix prepended to poster/backdrop paths.
    pub image_base_url: String,
    /// `language` query parameter sent with every request.
    pub language: String,
    /// Freshness window of the response cache, in seconds.
    pub cache_ttl_secs: u64,
    /// Per-request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Last page the infinite feed will request.
    pub max_feed_pages: u32,
    /// Maximum number of retained search keywords.
    pub search_history_limit: usize,
}

impl Default for MyflixConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            cache_ttl_secs: 120,
            request_timeout_secs: 30,
            max_feed_pages: 10,
            search_history_limit: 20,
        }
    }
}

impl MyflixConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
