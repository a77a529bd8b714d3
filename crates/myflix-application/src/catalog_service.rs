//! Catalog queries routed through the response cache.
//!
//! Every call resolves the API key first, then consults the cache, and only
//! then reaches the transport. A caller whose token fired while the request
//! was in flight gets `MyflixError::Cancelled`; the response is still cached
//! for the next caller.

use myflix_core::cache::{Clock, ResponseCache};
use myflix_core::catalog::{
    CatalogRequest, CuratedList, DiscoverQuery, Genre, GenreListResponse, MetadataTransport,
    Movie, MovieListResponse,
};
use myflix_core::config::MyflixConfig;
use myflix_core::error::{MyflixError, Result};
use myflix_core::session::CredentialSource;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The four curated rows shown on the home screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeRows {
    pub now_playing: Vec<Movie>,
    pub popular: Vec<Movie>,
    pub top_rated: Vec<Movie>,
    pub trending: Vec<Movie>,
}

impl HomeRows {
    /// Movies from the rows whose id appears in `watched`, in row order
    /// (now playing, popular, top rated, trending). A movie listed in more
    /// than one row is returned once.
    pub fn continue_watching(&self, watched: &[u64]) -> Vec<Movie> {
        let mut seen = HashSet::new();
        [&self.now_playing, &self.popular, &self.top_rated, &self.trending]
            .into_iter()
            .flatten()
            .filter(|movie| watched.contains(&movie.id) && seen.insert(movie.id))
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct CatalogService {
    transport: Arc<dyn MetadataTransport>,
    credentials: Arc<dyn CredentialSource>,
    language: String,
    movies: ResponseCache<Vec<Movie>>,
    genres: ResponseCache<Vec<Genre>>,
}

impl CatalogService {
    pub fn new(
        transport: Arc<dyn MetadataTransport>,
        credentials: Arc<dyn CredentialSource>,
        clock: Arc<dyn Clock>,
        config: &MyflixConfig,
    ) -> Self {
        Self {
            transport,
            credentials,
            language: config.language.clone(),
            movies: ResponseCache::new(config.cache_ttl(), clock.clone()),
            genres: ResponseCache::new(config.cache_ttl(), clock),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub async fn curated(
        &self,
        list: CuratedList,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<Movie>> {
        let request = CatalogRequest::curated(list, page, &self.language);
        self.fetch(&self.movies, request, cancel, |body: MovieListResponse| body.results)
            .await
    }

    pub async fn now_playing(&self, page: u32, cancel: &CancellationToken) -> Result<Vec<Movie>> {
        self.curated(CuratedList::NowPlaying, page, cancel).await
    }

    pub async fn popular(&self, page: u32, cancel: &CancellationToken) -> Result<Vec<Movie>> {
        self.curated(CuratedList::Popular, page, cancel).await
    }

    pub async fn top_rated(&self, page: u32, cancel: &CancellationToken) -> Result<Vec<Movie>> {
        self.curated(CuratedList::TopRated, page, cancel).await
    }

    pub async fn trending(&self, page: u32, cancel: &CancellationToken) -> Result<Vec<Movie>> {
        self.curated(CuratedList::Trending, page, cancel).await
    }

    /// Filtered discovery. Adult titles are always excluded.
    pub async fn discover(
        &self,
        query: &DiscoverQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<Movie>> {
        let request = CatalogRequest::discover(query, &self.language);
        self.fetch(&self.movies, request, cancel, |body: MovieListResponse| body.results)
            .await
    }

    pub async fn genres(&self, cancel: &CancellationToken) -> Result<Vec<Genre>> {
        let request = CatalogRequest::genres(&self.language);
        self.fetch(&self.genres, request, cancel, |body: GenreListResponse| body.genres)
            .await
    }

    /// Fetches page 1 of every curated list concurrently.
    ///
    /// Fails as a whole if any list fails.
    pub async fn home_rows(&self, cancel: &CancellationToken) -> Result<HomeRows> {
        let (now_playing, popular, top_rated, trending) = tokio::try_join!(
            self.now_playing(1, cancel),
            self.popular(1, cancel),
            self.top_rated(1, cancel),
            self.trending(1, cancel),
        )?;

        Ok(HomeRows {
            now_playing,
            popular,
            top_rated,
            trending,
        })
    }

    /// Resolves one request through `cache`.
    ///
    /// # Arguments
    /// * `cache` - Cache the decoded value is read from and written to
    /// * `request` - Path and query; its `cache_key` identifies the entry
    /// * `cancel` - Checked before the lookup and again after the fetch
    /// * `extract` - Picks the payload out of the decoded body `B`
    ///
    /// # Returns
    /// The cached or freshly fetched value. `MissingCredential` when no API
    /// key is stored, `Cancelled` when `cancel` fired (a fetched value is
    /// still cached), `UpstreamFetchFailure` on transport or decode errors.
    async fn fetch<T, B>(
        &self,
        cache: &ResponseCache<T>,
        request: CatalogRequest,
        cancel: &CancellationToken,
        extract: fn(B) -> T,
    ) -> Result<T>
    where
        T: Clone + Send + Sync,
        B: DeserializeOwned,
    {
        let api_key = self.credentials.api_key()?;
        if cancel.is_cancelled() {
            return Err(MyflixError::Cancelled);
        }

        let key = request.cache_key();
        if let Some(hit) = cache.get(&key).await {
            tracing::debug!("Cache hit: {}", key);
            return Ok(hit);
        }
        tracing::debug!("Cache miss: {}", key);

        let body = self
            .transport
            .get_json(&request, &api_key)
            .await
            .inspect_err(|e| tracing::warn!("Catalog fetch failed for {}: {}", request.path(), e))?;
        let decoded: B = serde_json::from_value(body).map_err(|e| {
            MyflixError::upstream(format!("Unexpected response shape from {}: {}", request.path(), e))
        })?;
        let data = extract(decoded);
        cache.put(key, data.clone()).await;

        if cancel.is_cancelled() {
            tracing::debug!("Discarding result for cancelled caller: {}", request.path());
            return Err(MyflixError::Cancelled);
        }
        Ok(data)
    }
}
