//! Request builders for the metadata service.
//!
//! A [`CatalogRequest`] carries the endpoint path and every query parameter
//! except the API key. Its [`CatalogRequest::cache_key`] is therefore unique
//! per logical query and stable across accounts.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Fixed, curated movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum CuratedList {
    NowPlaying,
    Popular,
    TopRated,
    Trending,
}

impl CuratedList {
    pub fn path(self) -> &'static str {
        match self {
            Self::NowPlaying => "/movie/now_playing",
            Self::Popular => "/movie/popular",
            Self::TopRated => "/movie/top_rated",
            Self::Trending => "/trending/movie/week",
        }
    }
}

/// Sort orders accepted by the discovery endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString)]
pub enum SortOrder {
    #[default]
    #[strum(serialize = "popularity.desc")]
    PopularityDesc,
    #[strum(serialize = "popularity.asc")]
    PopularityAsc,
    #[strum(serialize = "vote_average.desc")]
    VoteAverageDesc,
    #[strum(serialize = "vote_average.asc")]
    VoteAverageAsc,
    #[strum(serialize = "primary_release_date.desc")]
    ReleaseDateDesc,
    #[strum(serialize = "primary_release_date.asc")]
    ReleaseDateAsc,
}

/// Parameters of a discovery (filtered) query.
///
/// Adult content is always excluded; it is not a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub page: u32,
    pub with_genres: Option<u32>,
    pub vote_average_gte: f32,
    pub sort_by: SortOrder,
}

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            page: 1,
            with_genres: None,
            vote_average_gte: 0.0,
            sort_by: SortOrder::default(),
        }
    }
}

impl DiscoverQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn genre(mut self, genre_id: u32) -> Self {
        self.with_genres = Some(genre_id);
        self
    }

    pub fn min_rating(mut self, rating: f32) -> Self {
        self.vote_average_gte = rating;
        self
    }

    pub fn sort_by(mut self, order: SortOrder) -> Self {
        self.sort_by = order;
        self
    }
}

/// A fully parameterized GET against the metadata service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    path: String,
    params: Vec<(String, String)>,
}

impl CatalogRequest {
    pub fn curated(list: CuratedList, page: u32, language: &str) -> Self {
        Self {
            path: list.path().to_string(),
            params: vec![
                ("language".to_string(), language.to_string()),
                ("page".to_string(), page.to_string()),
            ],
        }
    }

    pub fn discover(query: &DiscoverQuery, language: &str) -> Self {
        let mut params = vec![
            ("language".to_string(), language.to_string()),
            ("page".to_string(), query.page.to_string()),
            ("sort_by".to_string(), query.sort_by.to_string()),
            ("include_adult".to_string(), "false".to_string()),
            (
                "vote_average.gte".to_string(),
                query.vote_average_gte.to_string(),
            ),
        ];
        if let Some(genre_id) = query.with_genres {
            params.push(("with_genres".to_string(), genre_id.to_string()));
        }

        Self {
            path: "/discover/movie".to_string(),
            params,
        }
    }

    pub fn genres(language: &str) -> Self {
        Self {
            path: "/genre/movie/list".to_string(),
            params: vec![("language".to_string(), language.to_string())],
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// `path?k=v&...` in parameter order.
    pub fn cache_key(&self) -> String {
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}
