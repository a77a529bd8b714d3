//! Catalog records as returned by the metadata service.

use serde::{Deserialize, Serialize};

/// A movie record from a list or discovery endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    /// Full poster URL under `image_base`, if the movie has a poster.
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base, path))
    }

    pub fn backdrop_url(&self, image_base: &str) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|path| format!("{}{}", image_base, path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Body of the list and discovery endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub results: Vec<Movie>,
}

/// Body of the genre endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}
