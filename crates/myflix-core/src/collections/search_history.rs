//! Per-profile search keyword history.
//!
//! Most recent first, de-duplicated and bounded. Repeating a keyword that is
//! already present does not move it to the front.

use super::scoped_list::ScopedList;
use super::{ProfileScope, ScopedCollection};
use crate::error::Result;
use crate::storage::{SharedStore, keys};

pub const DEFAULT_SEARCH_HISTORY_LIMIT: usize = 20;

pub struct SearchHistory {
    list: ScopedList<String>,
    limit: usize,
}

impl SearchHistory {
    pub fn new(store: SharedStore) -> Self {
        Self::with_limit(store, DEFAULT_SEARCH_HISTORY_LIMIT)
    }

    pub fn with_limit(store: SharedStore, limit: usize) -> Self {
        Self {
            list: ScopedList::new(store, keys::SEARCH_HISTORY_PREFIX),
            limit,
        }
    }

    pub fn keywords(&self) -> &[String] {
        self.list.items()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Records `keyword` (trimmed). Blank and already-present keywords are ignored.
    pub fn add(&mut self, keyword: &str) -> Result<()> {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let limit = self.limit;
        self.list.mutate(|keywords| {
            if keywords.iter().any(|k| k == trimmed) {
                return false;
            }
            keywords.insert(0, trimmed.to_string());
            keywords.truncate(limit);
            true
        })?;
        Ok(())
    }

    pub fn remove(&mut self, keyword: &str) -> Result<()> {
        self.list.mutate(|keywords| {
            let before = keywords.len();
            keywords.retain(|k| k != keyword);
            keywords.len() != before
        })?;
        Ok(())
    }
}

impl ScopedCollection for SearchHistory {
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
    use crate::storage::{KeyValueStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn bound() -> (SearchHistory, Arc<MemoryStore>) {
        let memory = Arc::new(MemoryStore::new());
        let mut history = SearchHistory::new(memory.clone());
        history
            .load(Some(&ProfileScope::new("u@x.com", "default")))
            .unwrap();
        (history, memory)
    }

    #[test]
    fn test_duplicate_keyword_is_ignored() {
        let (mut history, _) = bound();
        history.add("dune").unwrap();
        history.add("dune").unwrap();
        assert_eq!(history.keywords(), &["dune".to_string()]);
    }

    #[test]
    fn test_repeat_does_not_reorder() {
        let (mut history, _) = bound();
        history.add("dune").unwrap();
        history.add("alien").unwrap();
        history.add("  dune ").unwrap();
        assert_eq!(history.keywords(), &["alien".to_string(), "dune".to_string()]);
    }

    #[test]
    fn test_blank_keywords_are_ignored() {
        let (mut history, memory) = bound();
        history.add("   ").unwrap();
        assert!(history.keywords().is_empty());
        assert!(memory.keys().is_empty());
    }

    #[test]
    fn test_keeps_most_recent_twenty() {
        let (mut history, _) = bound();
        for i in 1..=21 {
            history.add(&format!("kw{}", i)).unwrap();
        }

        assert_eq!(history.keywords().len(), 20);
        assert_eq!(history.keywords()[0], "kw21");
        assert_eq!(history.keywords()[19], "kw2");
        assert!(!history.keywords().contains(&"kw1".to_string()));
    }

    #[test]
    fn test_remove_and_clear() {
        let (mut history, memory) = bound();
        history.add("dune").unwrap();
        history.add("alien").unwrap();

        history.remove("dune").unwrap();
        assert_eq!(history.keywords(), &["alien".to_string()]);

        history.clear().unwrap();
        assert!(history.keywords().is_empty());
        assert_eq!(
            memory.get("myflix_search_history_u@x.com_default").unwrap(),
            None
        );
    }

    #[test]
    fn test_malformed_history_loads_empty() {
        let memory = Arc::new(MemoryStore::new());
        memory
            .set("myflix_search_history_u@x.com_default", "{\"not\":\"a list\"}")
            .unwrap();

        let mut history = SearchHistory::new(memory);
        history
            .load(Some(&ProfileScope::new("u@x.com", "default")))
            .unwrap();
        assert!(history.keywords().is_empty());

        history.add("dune").unwrap();
        assert_eq!(history.keywords(), &["dune".to_string()]);
    }
}
