//! Time-boxed response cache.
//!
//! Entries are keyed by a caller-built string that must encode every
//! parameter affecting the response. An entry is fresh while
//! `now - timestamp < ttl`; stale entries are never evicted, they are simply
//! ignored by [`ResponseCache::get`] and overwritten by the next
//! [`ResponseCache::put`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Freshness window used when the configuration does not override it.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(120);

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic freshness checks.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A cached value and the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: Instant,
}

impl<T> CacheEntry<T> {
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.timestamp) < ttl
    }
}

/// In-memory cache with lazy TTL invalidation.
///
/// Cloning shares the underlying map.
pub struct ResponseCache<T> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T> Clone for ResponseCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T> fmt::Debug for ResponseCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync> ResponseCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            clock,
        }
    }

    pub fn with_default_ttl(clock: Arc<dyn Clock>) -> Self {
        Self::new(DEFAULT_CACHE_TTL, clock)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the value stored under `key` if it is still fresh.
    pub async fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.data.clone())
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub async fn put(&self, key: impl Into<String>, value: T) {
        let entry = CacheEntry {
            data: value,
            timestamp: self.clock.now(),
        };
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), entry);
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
