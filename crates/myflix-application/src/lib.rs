//! Application layer: the explicit [`AppContext`] and the use cases built on it.

pub mod catalog_service;
pub mod context;
pub mod listing;
pub mod logging;
pub mod personalization;

pub use catalog_service::{CatalogService, HomeRows};
pub use context::AppContext;
pub use listing::{InfiniteFeed, PagedListing, SearchListing};
pub use personalization::Personalization;
pub use tokio_util::sync::CancellationToken;
