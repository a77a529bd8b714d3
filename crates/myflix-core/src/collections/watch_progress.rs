//! Per-profile set of watched movie ids.
//!
//! Ids keep insertion order so "continue watching" rows are stable, but
//! membership is the only semantic that matters.

use super::scoped_list::ScopedList;
use super::{ProfileScope, ScopedCollection};
use crate::error::Result;
use crate::storage::{SharedStore, keys};

pub struct WatchProgress {
    list: ScopedList<u64>,
}

impl WatchProgress {
    pub fn new(store: SharedStore) -> Self {
        Self {
            list: ScopedList::new(store, keys::WATCH_HISTORY_PREFIX),
        }
    }

    pub fn ids(&self) -> &[u64] {
        self.list.items()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.list.items().contains(&id)
    }

    pub fn add(&mut self, id: u64) -> Result<()> {
        self.list.mutate(|ids| {
            if ids.contains(&id) {
                return false;
            }
            ids.push(id);
            true
        })?;
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<()> {
        self.list.mutate(|ids| {
            let before = ids.len();
            ids.retain(|&existing| existing != id);
            ids.len() != before
        })?;
        Ok(())
    }
}

impl ScopedCollection for WatchProgress {
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
    use std::sync::Arc;

    #[test]
    fn test_add_and_remove_are_idempotent() {
        let memory = Arc::new(MemoryStore::new());
        let mut progress = WatchProgress::new(memory.clone());
        progress
            .load(Some(&ProfileScope::new("u@x.com", "default")))
            .unwrap();

        progress.add(10).unwrap();
        progress.add(20).unwrap();
        progress.add(10).unwrap();
        assert_eq!(progress.ids(), &[10, 20]);

        progress.remove(10).unwrap();
        progress.remove(10).unwrap();
        assert!(!progress.contains(10));
        assert_eq!(
            memory
                .get("myflix_watch_history_u@x.com_default")
                .unwrap()
                .as_deref(),
            Some("[20]")
        );
    }
}
