//! Transport trait for the metadata service.

use async_trait::async_trait;

use super::query::CatalogRequest;
use crate::error::Result;

/// Performs authenticated GET requests against the metadata service.
///
/// The API key travels as a query parameter and is supplied per call, so
/// a transport holds no account state.
#[async_trait]
pub trait MetadataTransport: Send + Sync {
    /// Executes `request` and returns the decoded JSON body.
    ///
    /// Network errors and non-success statuses map to
    /// `MyflixError::UpstreamFetchFailure`.
    async fn get_json(&self, request: &CatalogRequest, api_key: &str) -> Result<serde_json::Value>;
}
