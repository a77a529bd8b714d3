//! Per-profile wishlist.

use serde::{Deserialize, Serialize};

use super::scoped_list::ScopedList;
use super::{ProfileScope, ScopedCollection};
use crate::catalog::Movie;
use crate::error::Result;
use crate::storage::{SharedStore, keys};

/// The subset of a [`Movie`] retained in a wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: String,
}

impl From<&Movie> for WishlistEntry {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            vote_average: movie.vote_average,
            release_date: movie.release_date.clone(),
            overview: movie.overview.clone(),
        }
    }
}

impl From<Movie> for WishlistEntry {
    fn from(movie: Movie) -> Self {
        Self::from(&movie)
    }
}

pub struct Wishlist {
    list: ScopedList<WishlistEntry>,
}

impl Wishlist {
    pub fn new(store: SharedStore) -> Self {
        Self {
            list: ScopedList::new(store, keys::WISHLIST_PREFIX),
        }
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        self.list.items()
    }

    pub fn is_member(&self, id: u64) -> bool {
        self.list.items().iter().any(|m| m.id == id)
    }

    /// Removes the entry with the same id if present, otherwise appends it.
    pub fn toggle(&mut self, item: impl Into<WishlistEntry>) -> Result<()> {
        let entry = item.into();
        self.list.mutate(|items| {
            if let Some(pos) = items.iter().position(|m| m.id == entry.id) {
                items.remove(pos);
            } else {
                items.push(entry);
            }
            true
        })?;
        Ok(())
    }
}

impl ScopedCollection for Wishlist {
    fn load(&mut self, scope: Option<&ProfileScope>) -> Result<()> {
        self.list.load(scope)
    }

    fn clear(&mut self) -> Result<()> {
        self.list.clear()
    }

    fn storage_key(&self) -> Option<&str> {
        self.list.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FlakyStore;
    use crate::storage::{KeyValueStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: "overview".to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            backdrop_path: Some("/backdrop.jpg".to_string()),
            vote_average: Some(7.5),
            release_date: Some("2024-01-01".to_string()),
            genre_ids: vec![28, 12],
        }
    }

    fn bound() -> (Wishlist, Arc<MemoryStore>) {
        let memory = Arc::new(MemoryStore::new());
        let mut wishlist = Wishlist::new(memory.clone());
        wishlist
            .load(Some(&ProfileScope::new("u@x.com", "default")))
            .unwrap();
        (wishlist, memory)
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let (mut wishlist, _) = bound();
        wishlist.toggle(&movie(1)).unwrap();
        assert!(wishlist.is_member(1));

        wishlist.toggle(&movie(1)).unwrap();
        assert!(!wishlist.is_member(1));
        assert!(wishlist.entries().is_empty());
    }

    #[test]
    fn test_toggle_stores_bounded_projection() {
        let (mut wishlist, memory) = bound();
        wishlist.toggle(movie(7)).unwrap();

        let raw = memory
            .get("myflix_wishlist_u@x.com_default")
            .unwrap()
            .unwrap();
        assert!(!raw.contains("backdrop"));
        assert!(!raw.contains("genre_ids"));
        assert_eq!(wishlist.entries()[0], WishlistEntry::from(&movie(7)));
    }

    #[test]
    fn test_unscoped_wishlist_ignores_writes() {
        let memory = Arc::new(MemoryStore::new());
        let mut wishlist = Wishlist::new(memory.clone());

        wishlist.toggle(&movie(1)).unwrap();
        assert!(!wishlist.is_member(1));
        assert!(memory.keys().is_empty());
        assert_eq!(wishlist.storage_key(), None);
    }

    #[test]
    fn test_clear_removes_key() {
        let (mut wishlist, memory) = bound();
        wishlist.toggle(&movie(1)).unwrap();

        wishlist.clear().unwrap();
        assert!(wishlist.entries().is_empty());
        assert_eq!(memory.get("myflix_wishlist_u@x.com_default").unwrap(), None);
    }

    #[test]
    fn test_failed_write_leaves_wishlist_unchanged() {
        let store = Arc::new(FlakyStore::failing_after(0));
        let mut wishlist = Wishlist::new(store.clone());
        wishlist
            .load(Some(&ProfileScope::new("u@x.com", "default")))
            .unwrap();

        assert!(wishlist.toggle(&movie(5)).is_err());
        assert!(!wishlist.is_member(5));
        assert_eq!(store.get("myflix_wishlist_u@x.com_default").unwrap(), None);

        store.heal();
        wishlist.toggle(&movie(5)).unwrap();
        assert!(wishlist.is_member(5));
    }

    #[test]
    fn test_failed_clear_keeps_entries() {
        let store = Arc::new(FlakyStore::failing_after(1));
        let mut wishlist = Wishlist::new(store.clone());
        wishlist
            .load(Some(&ProfileScope::new("u@x.com", "default")))
            .unwrap();
        wishlist.toggle(&movie(5)).unwrap();

        assert!(wishlist.clear().is_err());
        assert!(wishlist.is_member(5));
        assert!(store.get("myflix_wishlist_u@x.com_default").unwrap().is_some());
    }
}
