//! API key lookup for catalog queries.

use crate::error::{MyflixError, Result};
use crate::storage::{SharedStore, keys};

/// Supplies the API key for the current session.
pub trait CredentialSource: Send + Sync {
    /// Returns the key, or `MissingCredential` when nobody is signed in.
    fn api_key(&self) -> Result<String>;
}

/// Reads the key persisted at login, on every call.
///
/// Reading through the store means a logout in another handle on the same
/// store is observed immediately.
#[derive(Clone)]
pub struct StoredApiKey {
    store: SharedStore,
}

impl StoredApiKey {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl CredentialSource for StoredApiKey {
    fn api_key(&self) -> Result<String> {
        let logged_in = self.store.get(keys::IS_LOGGED_IN)?.as_deref() == Some("true");
        if !logged_in {
            return Err(MyflixError::MissingCredential);
        }

        match self.store.get(keys::API_KEY)? {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(MyflixError::MissingCredential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_missing_without_login() {
        let memory = Arc::new(MemoryStore::new());
        let source = StoredApiKey::new(memory.clone());
        assert_eq!(source.api_key().unwrap_err(), MyflixError::MissingCredential);

        // A leftover key alone does not authorize requests.
        memory.set(keys::API_KEY, "key1").unwrap();
        assert_eq!(source.api_key().unwrap_err(), MyflixError::MissingCredential);

        memory.set(keys::IS_LOGGED_IN, "true").unwrap();
        assert_eq!(source.api_key().unwrap(), "key1");
    }
}
