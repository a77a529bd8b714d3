//! TmdbClient - REST implementation of [`MetadataTransport`].
//!
//! Every request is a GET against `{base_url}{path}` with the API key and the
//! request's parameters in the query string.

use async_trait::async_trait;
use myflix_core::catalog::{CatalogRequest, MetadataTransport};
use myflix_core::config::{DEFAULT_API_BASE_URL, MyflixConfig};
use myflix_core::error::{MyflixError, Result};
use reqwest::Client;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for TmdbClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &MyflixConfig) -> Self {
        Self::new(config.api_base_url.clone()).with_timeout(config.request_timeout())
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataTransport for TmdbClient {
    async fn get_json(&self, request: &CatalogRequest, api_key: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, request.path());
        tracing::debug!("GET {}", request.cache_key());

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key)])
            .query(request.params())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| MyflixError::upstream(format!("Request to {} failed: {}", request.path(), e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Metadata service returned {} for {}", status, request.path());
            return Err(MyflixError::upstream(format!(
                "Metadata service error ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| MyflixError::upstream(format!("Failed to parse response: {}", e)))
    }
}
