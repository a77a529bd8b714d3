//! Catalog domain module.
//!
//! # Module Structure
//!
//! - `model`: Movie and genre records returned by the metadata service
//! - `query`: Curated-list and discovery request builders
//! - `transport`: Trait implemented by the HTTP client

mod model;
mod query;
mod transport;

pub use model::{Genre, GenreListResponse, Movie, MovieListResponse};
pub use query::{CatalogRequest, CuratedList, DiscoverQuery, SortOrder};
pub use transport::MetadataTransport;
