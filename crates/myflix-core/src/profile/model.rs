//! Profile domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_PROFILES: usize = 2;

pub const DEFAULT_PROFILE_ID: &str = "default";
pub const DEFAULT_PROFILE_NAME: &str = "기본 프로필";
pub const DEFAULT_PROFILE_COLOR: &str = "#e50914";
pub const DEFAULT_PROFILE_ICON: &str = "😀";

/// A named sub-identity within one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// CSS color token.
    pub color: String,
    /// Emoji or icon token.
    pub icon: String,
}

impl Profile {
    /// Creates a profile with a fresh `p_<uuid>` id.
    pub fn new(name: impl Into<String>, color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: format!("p_{}", Uuid::new_v4().simple()),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// The profile seeded for accounts that have none.
    pub fn seed() -> Self {
        Self {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: DEFAULT_PROFILE_NAME.to_string(),
            color: DEFAULT_PROFILE_COLOR.to_string(),
            icon: DEFAULT_PROFILE_ICON.to_string(),
        }
    }
}

/// Partial update of a profile's display fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl ProfilePatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(color) = &self.color {
            profile.color = color.clone();
        }
        if let Some(icon) = &self.icon {
            profile.icon = icon.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profiles_get_unique_ids() {
        let a = Profile::new("Kid", "#00f", "🐱");
        let b = Profile::new("Kid", "#00f", "🐱");
        assert!(a.id.starts_with("p_"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut profile = Profile::seed();
        ProfilePatch::default().icon("🎬").apply_to(&mut profile);

        assert_eq!(profile.icon, "🎬");
        assert_eq!(profile.name, DEFAULT_PROFILE_NAME);
        assert_eq!(profile.color, DEFAULT_PROFILE_COLOR);
    }
}
