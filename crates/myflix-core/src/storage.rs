//! Persisted key-value storage.
//!
//! The catalog layer persists everything (credentials, session flags,
//! profiles and profile-scoped collections) as JSON strings under namespaced
//! keys. Backends are synchronous so that a mutation and its persisted
//! reflection never race.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{MyflixError, Result};

/// Storage keys shared across modules.
pub mod keys {
    pub const USERS: &str = "users";
    pub const API_KEY: &str = "TMDb-Key";
    pub const CURRENT_USER: &str = "currentUser";
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    pub const KEEP_LOGIN: &str = "keepLogin";

    pub const PROFILES_PREFIX: &str = "myflix_profiles";
    pub const ACTIVE_PROFILE_PREFIX: &str = "myflix_active_profile";
    pub const WISHLIST_PREFIX: &str = "myflix_wishlist";
    pub const SEARCH_HISTORY_PREFIX: &str = "myflix_search_history";
    pub const WATCH_HISTORY_PREFIX: &str = "myflix_watch_history";

    pub fn profiles(account_id: &str) -> String {
        format!("{}_{}", PROFILES_PREFIX, account_id)
    }

    pub fn active_profile(account_id: &str) -> String {
        format!("{}_{}", ACTIVE_PROFILE_PREFIX, account_id)
    }
}

/// String-keyed, string-valued synchronous storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Reads and decodes a JSON value.
///
/// Returns `Ok(None)` when the key is absent and
/// `Err(MalformedStoredData)` when the stored text does not decode as `T`.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| MyflixError::malformed(key, e.to_string())),
    }
}

/// Reads a JSON value, self-healing absent or corrupted data to `T::default()`.
///
/// Backend failures are still propagated.
pub fn load_json_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T> {
    match read_json(store, key) {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(err) if err.is_malformed() => {
            tracing::warn!("Discarding malformed stored data: {}", err);
            Ok(T::default())
        }
        Err(err) => Err(err),
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Volatile in-memory store.
///
/// Used for tests and for sessions that should not outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }

    /// Returns all keys currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
