//! Profile domain module.
//!
//! An account owns up to [`MAX_PROFILES`] profiles, exactly one of which is
//! active whenever any exist. The active profile scopes all personalization
//! data.

mod model;
mod registry;

pub use model::{
    DEFAULT_PROFILE_COLOR, DEFAULT_PROFILE_ICON, DEFAULT_PROFILE_ID, DEFAULT_PROFILE_NAME,
    MAX_PROFILES, Profile, ProfilePatch,
};
pub use registry::ProfileRegistry;
