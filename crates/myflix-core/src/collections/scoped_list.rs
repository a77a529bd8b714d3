//! Persisted list bound to an optional storage key.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ProfileScope;
use crate::error::Result;
use crate::storage::{SharedStore, load_json_or_default, save_json};

pub(crate) struct ScopedList<T> {
    store: SharedStore,
    prefix: &'static str,
    key: Option<String>,
    items: Vec<T>,
}

impl<T> ScopedList<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(store: SharedStore, prefix: &'static str) -> Self {
        Self {
            store,
            prefix,
            key: None,
            items: Vec::new(),
        }
    }

    pub(crate) fn load(&mut self, scope: Option<&ProfileScope>) -> Result<()> {
        self.key = None;
        self.items.clear();

        let Some(scope) = scope else {
            return Ok(());
        };
        let key = scope.storage_key(self.prefix);
        self.items = load_json_or_default(self.store.as_ref(), &key)?;
        self.key = Some(key);
        Ok(())
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Applies `f` to a copy and persists it when `f` reports a change.
    ///
    /// In-memory items are replaced only after the write succeeds, so a
    /// failed save leaves both sides unchanged. Unbound lists ignore the
    /// mutation entirely.
    pub(crate) fn mutate<F>(&mut self, f: F) -> Result<bool>
    where
        F: FnOnce(&mut Vec<T>) -> bool,
        T: Clone,
    {
        let Some(key) = self.key.as_deref() else {
            return Ok(false);
        };
        let mut next = self.items.clone();
        if !f(&mut next) {
            return Ok(false);
        }
        save_json(self.store.as_ref(), key, &next)?;
        self.items = next;
        Ok(true)
    }

    pub(crate) fn clear(&mut self) -> Result<()> {
        if let Some(key) = self.key.as_deref() {
            self.store.remove(key)?;
        }
        self.items.clear();
        Ok(())
    }
}
