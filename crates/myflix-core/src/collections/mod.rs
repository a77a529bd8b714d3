//! Profile-scoped collections.
//!
//! Wishlist, search history and watch progress are each persisted under
//! `{prefix}_{account}_{profile}`. With no active profile a collection reads
//! as empty and ignores writes.
//!
//! # Module Structure
//!
//! - `scoped_list`: Shared load/save/clear lifecycle
//! - `wishlist`: Toggle-able movie projections
//! - `search_history`: Bounded, de-duplicated keyword list
//! - `watch_progress`: Set of watched movie ids

mod scoped_list;
mod search_history;
mod watch_progress;
mod wishlist;

pub use search_history::{DEFAULT_SEARCH_HISTORY_LIMIT, SearchHistory};
pub use watch_progress::WatchProgress;
pub use wishlist::{Wishlist, WishlistEntry};

use crate::error::Result;

/// The (account, profile) pair that owns a set of collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileScope {
    pub account_id: String,
    pub profile_id: String,
}

impl ProfileScope {
    pub fn new(account_id: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            profile_id: profile_id.into(),
        }
    }

    pub fn storage_key(&self, prefix: &str) -> String {
        format!("{}_{}_{}", prefix, self.account_id, self.profile_id)
    }
}

/// Lifecycle shared by every profile-scoped collection.
pub trait ScopedCollection {
    /// Rebinds to `scope` and reloads from storage.
    ///
    /// After this returns, reads reflect the new scope only.
    fn load(&mut self, scope: Option<&ProfileScope>) -> Result<()>;

    /// Empties the collection and removes its persisted key.
    fn clear(&mut self) -> Result<()>;

    /// The key currently read and written, if bound.
    fn storage_key(&self) -> Option<&str>;
}
