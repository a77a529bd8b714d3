//! Atomic JSON file operations.
//!
//! Writes go through a uniquely named temporary file in the same directory,
//! are fsynced and then renamed over the target, so readers always observe
//! either the old or the new document. `update` additionally holds an
//! exclusive lock on a sibling `.lock` file so concurrent handles and
//! processes sharing the file serialize their read-modify-write cycles.
//! The lock file is never deleted; removing it would let a waiter and a
//! newcomer lock different inodes.

use myflix_core::error::{MyflixError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to a JSON document on disk.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err(MalformedStoredData)`: File content is not a valid `T`
    /// - `Err(Io)`: File could not be read
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| MyflixError::malformed(self.path.display().to_string(), e.to_string()))
    }

    /// Writes `data` atomically.
    ///
    /// Each call writes its own temporary file (`.{name}.XXXXXX.tmp`), so
    /// concurrent savers never clobber each other's staging data. The
    /// temporary file is removed if anything fails before the rename.
    pub fn save(&self, data: &T) -> Result<()> {
        let parent = self.parent_dir()?;
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(data)?;

        let mut tmp_file = tempfile::Builder::new()
            .prefix(&format!(".{}.", self.file_name()?))
            .suffix(".tmp")
            .tempfile_in(parent)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.as_file().sync_all()?;

        tmp_file.persist(&self.path).map_err(|e| MyflixError::from(e.error))?;
        Ok(())
    }

    /// Read-modify-write under an exclusive lock.
    ///
    /// Missing or malformed content is replaced by `default_value` before `f`
    /// runs, so a corrupted file heals on the next write.
    pub fn update<F, R>(&self, default_value: T, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(loaded) => loaded.unwrap_or(default_value),
            Err(e) if e.is_malformed() => {
                tracing::warn!("Replacing malformed storage file: {}", e);
                default_value
            }
            Err(e) => return Err(e),
        };

        let result = f(&mut data);
        self.save(&data)?;
        Ok(result)
    }

    fn parent_dir(&self) -> Result<&Path> {
        self.path
            .parent()
            .ok_or_else(|| MyflixError::storage("Path has no parent directory"))
    }

    fn file_name(&self) -> Result<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| MyflixError::storage("Path has no file name"))
    }
}

/// Exclusive lock on a persistent sibling file, released on drop.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| MyflixError::storage(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
