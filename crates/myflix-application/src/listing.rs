//! Pagers over the catalog.
//!
//! [`PagedListing`] backs the table view: one page at a time, optionally
//! filtered by genre. [`SearchListing`] backs the search view: a filtered
//! discovery page narrowed by a title keyword. [`InfiniteFeed`] backs the
//! scrolling view: pages are appended and a loading guard keeps page loads
//! from overlapping.

use myflix_core::catalog::{DiscoverQuery, Movie, SortOrder};
use myflix_core::collections::SearchHistory;
use myflix_core::error::Result;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::catalog_service::CatalogService;

/// Single-page view with an optional genre filter.
#[derive(Debug, Clone)]
pub struct PagedListing {
    genre: Option<u32>,
    page: u32,
    items: Vec<Movie>,
    error: Option<String>,
}

impl Default for PagedListing {
    fn default() -> Self {
        Self {
            genre: None,
            page: 1,
            items: Vec::new(),
            error: None,
        }
    }
}

impl PagedListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genre(&self) -> Option<u32> {
        self.genre
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    /// User-facing message of the last failed refresh.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Changes the genre filter. A different genre restarts at page 1 with
    /// no items; returns whether anything changed.
    pub fn set_genre(&mut self, genre: Option<u32>) -> bool {
        if self.genre == genre {
            return false;
        }
        self.genre = genre;
        self.page = 1;
        self.items.clear();
        true
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Loads the current page.
    ///
    /// Without a genre the curated popular list is used; with one, discovery
    /// sorted by popularity. On failure the previous items stay visible and
    /// the message is kept in [`PagedListing::error`]. A cancelled load
    /// leaves the listing untouched.
    pub async fn refresh(
        &mut self,
        catalog: &CatalogService,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let result = match self.genre {
            None => catalog.popular(self.page, cancel).await,
            Some(genre_id) => {
                let query = DiscoverQuery::new().page(self.page).genre(genre_id);
                catalog.discover(&query, cancel).await
            }
        };

        apply_page(result, &mut self.items, &mut self.error)
    }
}

/// Replaces `items` on success, records the message on failure and leaves
/// both alone when the caller was cancelled.
fn apply_page(
    result: Result<Vec<Movie>>,
    items: &mut Vec<Movie>,
    error: &mut Option<String>,
) -> Result<()> {
    match result {
        Ok(movies) => {
            *items = movies;
            *error = None;
            Ok(())
        }
        Err(e) if e.is_cancelled() => Err(e),
        Err(e) => {
            *error = Some(e.user_message());
            Err(e)
        }
    }
}

/// Discovery page with genre, rating and sort filters plus a client-side
/// title filter.
#[derive(Debug, Clone, Default)]
pub struct SearchListing {
    query: DiscoverQuery,
    keyword: String,
    items: Vec<Movie>,
    error: Option<String>,
}

impl SearchListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &DiscoverQuery {
        &self.query
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Every movie of the loaded page, before the title filter.
    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    /// Movies whose title contains the keyword, ignoring case. A blank
    /// keyword matches everything.
    pub fn results(&self) -> Vec<&Movie> {
        let needle = self.keyword.trim().to_lowercase();
        self.items
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Filter changes restart at page 1.
    pub fn set_genre(&mut self, genre: Option<u32>) {
        self.query.with_genres = genre;
        self.query.page = 1;
    }

    pub fn set_min_rating(&mut self, rating: f32) {
        self.query.vote_average_gte = rating;
        self.query.page = 1;
    }

    pub fn set_sort(&mut self, order: SortOrder) {
        self.query.sort_by = order;
        self.query.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.page = page.max(1);
    }

    /// Updates the title filter without recording it.
    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = keyword.to_string();
    }

    /// Runs a search for `keyword`: records it in `history` and returns to
    /// page 1. Blank keywords are not recorded.
    pub fn execute(&mut self, keyword: &str, history: &mut SearchHistory) -> Result<()> {
        self.keyword = keyword.to_string();
        self.query.page = 1;
        history.add(keyword)
    }

    /// Clears every filter and the keyword.
    pub fn reset_filters(&mut self) {
        self.query = DiscoverQuery::default();
        self.keyword.clear();
    }

    /// Loads the current discovery page. Failure and cancellation behave as
    /// in [`PagedListing::refresh`].
    pub async fn refresh(
        &mut self,
        catalog: &CatalogService,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let result = catalog.discover(&self.query, cancel).await;
        apply_page(result, &mut self.items, &mut self.error)
    }
}

/// Append-only feed of the popular list.
#[derive(Debug, Clone)]
pub struct InfiniteFeed {
    items: Vec<Movie>,
    next_page: u32,
    max_pages: u32,
    loading: bool,
    has_more: bool,
    error: Option<String>,
}

impl InfiniteFeed {
    pub fn new(max_pages: u32) -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            max_pages,
            loading: false,
            has_more: max_pages > 0,
            error: None,
        }
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Claims the next page, or `None` while a load is running or the feed
    /// is exhausted.
    pub fn begin_load(&mut self) -> Option<u32> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(self.next_page)
    }

    /// Applies the outcome of loading `page` and releases the guard.
    pub fn finish_load(&mut self, page: u32, result: &Result<Vec<Movie>>) {
        self.loading = false;
        match result {
            Ok(movies) => {
                if movies.is_empty() {
                    self.has_more = false;
                    return;
                }
                self.items.extend(movies.iter().cloned());
                self.next_page = page + 1;
                if page >= self.max_pages {
                    self.has_more = false;
                }
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                self.has_more = false;
                self.error = Some(e.user_message());
            }
        }
    }

    /// Loads the next page into `feed`.
    ///
    /// Returns `Ok(false)` without fetching when the guard is held or the
    /// feed is exhausted. The lock is not held across the fetch, so
    /// concurrent callers observe the guard instead of waiting.
    pub async fn load_more(
        feed: &Mutex<InfiniteFeed>,
        catalog: &CatalogService,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let Some(page) = feed.lock().await.begin_load() else {
            return Ok(false);
        };

        let result = catalog.popular(page, cancel).await;
        feed.lock().await.finish_load(page, &result);
        result.map(|_| true)
    }
}
