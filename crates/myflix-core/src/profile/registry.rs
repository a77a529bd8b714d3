//! Per-account profile registry.
//!
//! Profiles live under `myflix_profiles_{account}` and the active selection
//! under `myflix_active_profile_{account}`.

use super::model::{MAX_PROFILES, Profile, ProfilePatch};
use crate::error::{MyflixError, Result};
use crate::storage::{SharedStore, keys, load_json_or_default, save_json};

/// In-memory view of one account's profiles.
pub struct ProfileRegistry {
    store: SharedStore,
    account_id: Option<String>,
    profiles: Vec<Profile>,
    active_id: Option<String>,
}

impl ProfileRegistry {
    /// Creates an empty registry bound to no account.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            account_id: None,
            profiles: Vec::new(),
            active_id: None,
        }
    }

    /// Resets in-memory state and loads `account_id`'s profiles.
    ///
    /// An account with no stored profiles is seeded with [`Profile::seed`].
    /// The active profile resolves to the stored id if it still exists,
    /// otherwise the first profile. Passing `None` leaves the registry empty.
    ///
    /// # Arguments
    /// * `account_id` - Owner of the profile list, or `None` when signed out
    ///
    /// # Returns
    /// `Ok(())` once the list and active id are in memory. Both are written
    /// back to the store, so a failed write surfaces as its storage error.
    pub fn load(&mut self, account_id: Option<&str>) -> Result<()> {
        self.account_id = None;
        self.profiles.clear();
        self.active_id = None;

        let Some(account_id) = account_id else {
            return Ok(());
        };

        let profiles_key = keys::profiles(account_id);
        let mut profiles: Vec<Profile> = load_json_or_default(self.store.as_ref(), &profiles_key)?;
        if profiles.is_empty() {
            tracing::info!(account_id = %account_id, "Seeding default profile");
            profiles.push(Profile::seed());
        }
        if profiles.len() > MAX_PROFILES {
            tracing::warn!(
                account_id = %account_id,
                "Stored profile list exceeds limit, truncating to {}",
                MAX_PROFILES
            );
            profiles.truncate(MAX_PROFILES);
        }
        save_json(self.store.as_ref(), &profiles_key, &profiles)?;

        let stored_active = self.store.get(&keys::active_profile(account_id))?;
        let active_id = stored_active
            .filter(|id| profiles.iter().any(|p| &p.id == id))
            .or_else(|| profiles.first().map(|p| p.id.clone()));

        self.account_id = Some(account_id.to_string());
        self.profiles = profiles;
        self.active_id = active_id;
        self.persist_active()?;

        tracing::debug!(
            account_id = %account_id,
            profiles = self.profiles.len(),
            active = ?self.active_id,
            "Loaded profiles"
        );
        Ok(())
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn is_limit_reached(&self) -> bool {
        self.profiles.len() >= MAX_PROFILES
    }

    /// Adds a profile to the current account.
    ///
    /// # Errors
    ///
    /// - `MissingCredential` if no account is loaded
    /// - `LimitReached` if the account already has [`MAX_PROFILES`] profiles
    pub fn add_profile(&mut self, name: &str, color: &str, icon: &str) -> Result<Profile> {
        let account_id = self.require_account()?.to_string();
        if self.is_limit_reached() {
            return Err(MyflixError::LimitReached { max: MAX_PROFILES });
        }

        let profile = Profile::new(name, color, icon);
        let mut next = self.profiles.clone();
        next.push(profile.clone());
        save_json(self.store.as_ref(), &keys::profiles(&account_id), &next)?;
        self.profiles = next;

        tracing::info!(account_id = %account_id, profile_id = %profile.id, "Added profile");
        Ok(profile)
    }

    /// Applies `patch` to profile `id`. Unknown ids are ignored.
    pub fn update_profile(&mut self, id: &str, patch: &ProfilePatch) -> Result<()> {
        let account_id = self.require_account()?.to_string();
        let mut next = self.profiles.clone();
        let Some(profile) = next.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };
        patch.apply_to(profile);

        save_json(self.store.as_ref(), &keys::profiles(&account_id), &next)?;
        self.profiles = next;
        Ok(())
    }

    /// Removes profile `id`; if it was active, the first remaining profile
    /// becomes active (or none when the list is empty).
    pub fn delete_profile(&mut self, id: &str) -> Result<()> {
        let account_id = self.require_account()?.to_string();
        let next: Vec<Profile> = self.profiles.iter().filter(|p| p.id != id).cloned().collect();
        if next.len() == self.profiles.len() {
            return Ok(());
        }

        save_json(self.store.as_ref(), &keys::profiles(&account_id), &next)?;
        self.profiles = next;

        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.profiles.first().map(|p| p.id.clone());
            self.persist_active()?;
        }

        tracing::info!(account_id = %account_id, profile_id = %id, "Deleted profile");
        Ok(())
    }

    /// Marks profile `id` active.
    ///
    /// # Errors
    ///
    /// `NotFound` if the current account has no such profile.
    pub fn set_active_profile(&mut self, id: &str) -> Result<()> {
        self.require_account()?;
        if self.get(id).is_none() {
            return Err(MyflixError::not_found("profile", id));
        }

        self.active_id = Some(id.to_string());
        self.persist_active()
    }

    fn require_account(&self) -> Result<&str> {
        self.account_id.as_deref().ok_or(MyflixError::MissingCredential)
    }

    fn persist_active(&self) -> Result<()> {
        let Some(account_id) = self.account_id.as_deref() else {
            return Ok(());
        };
        let key = keys::active_profile(account_id);
        match self.active_id.as_deref() {
            Some(id) => self.store.set(&key, id),
            None => self.store.remove(&key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{DEFAULT_PROFILE_ID, DEFAULT_PROFILE_NAME};
    use crate::storage::{KeyValueStore, MemoryStore, read_json};
    use std::sync::Arc;

    fn loaded(account: &str) -> (ProfileRegistry, Arc<MemoryStore>) {
        let memory = Arc::new(MemoryStore::new());
        let mut registry = ProfileRegistry::new(memory.clone());
        registry.load(Some(account)).unwrap();
        (registry, memory)
    }

    #[test]
    fn test_first_load_seeds_default_profile() {
        let (registry, memory) = loaded("u@x.com");

        assert_eq!(registry.profiles().len(), 1);
        let active = registry.active_profile().unwrap();
        assert_eq!(active.id, DEFAULT_PROFILE_ID);
        assert_eq!(active.name, DEFAULT_PROFILE_NAME);

        let stored: Vec<Profile> = read_json(memory.as_ref(), "myflix_profiles_u@x.com")
            .unwrap()
            .unwrap();
        assert_eq!(stored, registry.profiles());
        assert_eq!(
            memory.get("myflix_active_profile_u@x.com").unwrap().as_deref(),
            Some(DEFAULT_PROFILE_ID)
        );
    }

    #[test]
    fn test_add_beyond_limit_fails() {
        let (mut registry, _) = loaded("u@x.com");
        let kid = registry.add_profile("Kid", "#0af", "🐱").unwrap();
        assert!(registry.is_limit_reached());

        let err = registry.add_profile("Third", "#000", "👻").unwrap_err();
        assert_eq!(err, MyflixError::LimitReached { max: MAX_PROFILES });
        assert_eq!(registry.profiles().len(), 2);
        assert_eq!(registry.profiles()[1], kid);
    }

    #[test]
    fn test_delete_active_falls_back_to_first_remaining() {
        let (mut registry, memory) = loaded("u@x.com");
        let kid = registry.add_profile("Kid", "#0af", "🐱").unwrap();
        registry.set_active_profile(&kid.id).unwrap();

        registry.delete_profile(&kid.id).unwrap();
        assert_eq!(registry.active_id(), Some(DEFAULT_PROFILE_ID));

        registry.delete_profile(DEFAULT_PROFILE_ID).unwrap();
        assert!(registry.profiles().is_empty());
        assert_eq!(registry.active_id(), None);
        assert_eq!(memory.get("myflix_active_profile_u@x.com").unwrap(), None);
    }

    #[test]
    fn test_delete_inactive_keeps_selection() {
        let (mut registry, _) = loaded("u@x.com");
        let kid = registry.add_profile("Kid", "#0af", "🐱").unwrap();

        registry.delete_profile(&kid.id).unwrap();
        assert_eq!(registry.active_id(), Some(DEFAULT_PROFILE_ID));
    }

    #[test]
    fn test_update_profile() {
        let (mut registry, memory) = loaded("u@x.com");
        registry
            .update_profile(DEFAULT_PROFILE_ID, &ProfilePatch::default().name("Me"))
            .unwrap();
        assert_eq!(registry.active_profile().unwrap().name, "Me");

        // Unknown ids are a silent no-op.
        registry
            .update_profile("missing", &ProfilePatch::default().name("x"))
            .unwrap();

        let mut reloaded = ProfileRegistry::new(memory);
        reloaded.load(Some("u@x.com")).unwrap();
        assert_eq!(reloaded.profiles()[0].name, "Me");
    }

    #[test]
    fn test_active_selection_survives_reload() {
        let (mut registry, memory) = loaded("u@x.com");
        let kid = registry.add_profile("Kid", "#0af", "🐱").unwrap();
        registry.set_active_profile(&kid.id).unwrap();

        let mut reloaded = ProfileRegistry::new(memory);
        reloaded.load(Some("u@x.com")).unwrap();
        assert_eq!(reloaded.active_id(), Some(kid.id.as_str()));
    }

    #[test]
    fn test_stale_active_id_resolves_to_first() {
        let (_, memory) = loaded("u@x.com");
        memory.set("myflix_active_profile_u@x.com", "p_gone").unwrap();

        let mut registry = ProfileRegistry::new(memory);
        registry.load(Some("u@x.com")).unwrap();
        assert_eq!(registry.active_id(), Some(DEFAULT_PROFILE_ID));
    }

    #[test]
    fn test_set_active_unknown_profile_fails() {
        let (mut registry, _) = loaded("u@x.com");
        let err = registry.set_active_profile("p_nope").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(registry.active_id(), Some(DEFAULT_PROFILE_ID));
    }

    #[test]
    fn test_switching_accounts_does_not_leak_profiles() {
        let (mut registry, _) = loaded("a@x.com");
        registry.add_profile("A-kid", "#0af", "🐱").unwrap();

        registry.load(Some("b@x.com")).unwrap();
        assert_eq!(registry.account_id(), Some("b@x.com"));
        assert_eq!(registry.profiles().len(), 1);
        assert!(registry.profiles().iter().all(|p| p.name != "A-kid"));

        registry.load(None).unwrap();
        assert!(registry.profiles().is_empty());
        assert!(registry.active_profile().is_none());
        assert_eq!(
            registry.add_profile("x", "y", "z").unwrap_err(),
            MyflixError::MissingCredential
        );
    }

    #[test]
    fn test_oversized_stored_list_is_truncated() {
        let memory = Arc::new(MemoryStore::new());
        let three = vec![
            Profile::new("a", "c", "i"),
            Profile::new("b", "c", "i"),
            Profile::new("c", "c", "i"),
        ];
        save_json(memory.as_ref(), "myflix_profiles_u@x.com", &three).unwrap();

        let mut registry = ProfileRegistry::new(memory);
        registry.load(Some("u@x.com")).unwrap();
        assert_eq!(registry.profiles().len(), MAX_PROFILES);
    }

    #[test]
    fn test_malformed_profiles_are_reseeded() {
        let memory = Arc::new(MemoryStore::new());
        memory.set("myflix_profiles_u@x.com", "oops").unwrap();

        let mut registry = ProfileRegistry::new(memory);
        registry.load(Some("u@x.com")).unwrap();
        assert_eq!(registry.active_id(), Some(DEFAULT_PROFILE_ID));
    }
}
