//! Profile selection and the collections it scopes.
//!
//! The registry and the three collections are owned together so that every
//! change of account or active profile rebinds all collections before the
//! caller can observe them.

use myflix_core::collections::{
    ProfileScope, ScopedCollection, SearchHistory, WatchProgress, Wishlist,
};
use myflix_core::error::Result;
use myflix_core::profile::{Profile, ProfilePatch, ProfileRegistry};
use myflix_core::storage::SharedStore;

pub struct Personalization {
    profiles: ProfileRegistry,
    wishlist: Wishlist,
    search_history: SearchHistory,
    watch_progress: WatchProgress,
}

impl Personalization {
    pub fn new(store: SharedStore, search_history_limit: usize) -> Self {
        Self {
            profiles: ProfileRegistry::new(store.clone()),
            wishlist: Wishlist::new(store.clone()),
            search_history: SearchHistory::with_limit(store.clone(), search_history_limit),
            watch_progress: WatchProgress::new(store),
        }
    }

    /// Drops all in-memory state and loads `account_id`'s profiles and the
    /// active profile's collections. `None` leaves everything empty.
    pub fn load_account(&mut self, account_id: Option<&str>) -> Result<()> {
        self.profiles.load(account_id)?;
        self.reload_collections()
    }

    /// The (account, active profile) pair, if both are set.
    pub fn scope(&self) -> Option<ProfileScope> {
        let account_id = self.profiles.account_id()?;
        let profile_id = self.profiles.active_id()?;
        Some(ProfileScope::new(account_id, profile_id))
    }

    fn reload_collections(&mut self) -> Result<()> {
        let scope = self.scope();
        self.wishlist.load(scope.as_ref())?;
        self.search_history.load(scope.as_ref())?;
        self.watch_progress.load(scope.as_ref())?;

        if let Some(scope) = scope {
            tracing::info!(
                account_id = %scope.account_id,
                profile_id = %scope.profile_id,
                "Switched active profile"
            );
        }
        Ok(())
    }

    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.profiles.active_profile()
    }

    pub fn add_profile(&mut self, name: &str, color: &str, icon: &str) -> Result<Profile> {
        self.profiles.add_profile(name, color, icon)
    }

    pub fn update_profile(&mut self, id: &str, patch: &ProfilePatch) -> Result<()> {
        self.profiles.update_profile(id, patch)
    }

    /// Deletes a profile; collections follow the fallback selection when the
    /// active profile was removed.
    pub fn delete_profile(&mut self, id: &str) -> Result<()> {
        let before = self.profiles.active_id().map(str::to_string);
        self.profiles.delete_profile(id)?;
        if self.profiles.active_id() != before.as_deref() {
            self.reload_collections()?;
        }
        Ok(())
    }

    pub fn set_active_profile(&mut self, id: &str) -> Result<()> {
        if self.profiles.active_id() == Some(id) {
            return Ok(());
        }
        self.profiles.set_active_profile(id)?;
        self.reload_collections()
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut Wishlist {
        &mut self.wishlist
    }

    pub fn search_history(&self) -> &SearchHistory {
        &self.search_history
    }

    pub fn search_history_mut(&mut self) -> &mut SearchHistory {
        &mut self.search_history
    }

    pub fn watch_progress(&self) -> &WatchProgress {
        &self.watch_progress
    }

    pub fn watch_progress_mut(&mut self) -> &mut WatchProgress {
        &mut self.watch_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myflix_core::MyflixError;
    use myflix_core::catalog::Movie;
    use myflix_core::profile::DEFAULT_PROFILE_ID;
    use myflix_core::storage::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
            release_date: None,
            genre_ids: Vec::new(),
        }
    }

    fn loaded(account: &str) -> Personalization {
        let mut personalization = Personalization::new(Arc::new(MemoryStore::new()), 20);
        personalization.load_account(Some(account)).unwrap();
        personalization
    }

    #[test]
    fn test_unscoped_collections_are_empty_and_inert() {
        let mut personalization = Personalization::new(Arc::new(MemoryStore::new()), 20);
        personalization.load_account(None).unwrap();

        assert!(personalization.scope().is_none());
        personalization.wishlist_mut().toggle(movie(1)).unwrap();
        personalization.search_history_mut().add("dune").unwrap();
        assert!(personalization.wishlist().entries().is_empty());
        assert!(personalization.search_history().keywords().is_empty());
    }

    #[test]
    fn test_profile_switch_swaps_every_collection() {
        let mut personalization = loaded("u@x.com");
        personalization.wishlist_mut().toggle(movie(1)).unwrap();
        personalization.search_history_mut().add("dune").unwrap();
        personalization.watch_progress_mut().add(7).unwrap();

        let second = personalization.add_profile("둘째", "#0000ff", "🎬").unwrap();
        personalization.set_active_profile(&second.id).unwrap();

        assert!(!personalization.wishlist().is_member(1));
        assert!(personalization.search_history().keywords().is_empty());
        assert!(!personalization.watch_progress().contains(7));

        personalization.set_active_profile(DEFAULT_PROFILE_ID).unwrap();
        assert!(personalization.wishlist().is_member(1));
        assert_eq!(personalization.search_history().keywords(), ["dune".to_string()]);
        assert!(personalization.watch_progress().contains(7));
    }

    #[test]
    fn test_deleting_active_profile_rebinds_collections() {
        let mut personalization = loaded("u@x.com");
        let second = personalization.add_profile("둘째", "#0000ff", "🎬").unwrap();
        personalization.set_active_profile(&second.id).unwrap();
        personalization.watch_progress_mut().add(3).unwrap();

        personalization.delete_profile(&second.id).unwrap();

        assert_eq!(personalization.profiles().active_id(), Some(DEFAULT_PROFILE_ID));
        assert!(!personalization.watch_progress().contains(3));
    }

    #[test]
    fn test_unknown_profile_keeps_current_scope() {
        let mut personalization = loaded("u@x.com");
        personalization.search_history_mut().add("alien").unwrap();

        let err = personalization.set_active_profile("p_missing").unwrap_err();
        assert!(matches!(err, MyflixError::NotFound { .. }));
        assert_eq!(personalization.search_history().keywords(), ["alien".to_string()]);
    }
}
