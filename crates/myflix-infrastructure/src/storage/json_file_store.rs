//! [`KeyValueStore`] persisted as a single JSON object on disk.

use myflix_core::error::Result;
use myflix_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::atomic_json::AtomicJsonFile;

type Entries = BTreeMap<String, String>;

/// Durable key-value store backed by one JSON file.
///
/// Every read goes to disk and every write is a locked read-modify-write, so
/// several processes sharing the file see each other's changes on their next
/// access. A corrupted file reads as empty and is rewritten on the next
/// mutation.
pub struct JsonFileStore {
    file: AtomicJsonFile<Entries>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file = AtomicJsonFile::new(path.into());
        tracing::debug!("Opened key-value store at {}", file.path().display());
        Self { file }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn snapshot(&self) -> Result<Entries> {
        match self.file.load() {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(e) if e.is_malformed() => {
                tracing::warn!("Storage file is malformed, reading as empty: {}", e);
                Ok(Entries::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.snapshot()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.remove(key);
        })
    }
}
