//! HTTP access to the movie metadata service.

pub mod tmdb_client;

pub use tmdb_client::TmdbClient;
