//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Authenticated/anonymous session value
//! - `state`: Persisted session state (hydrate, authenticate, logout)
//! - `credential_source`: API key lookup used by catalog queries

mod credential_source;
mod model;
mod state;

pub use credential_source::{CredentialSource, StoredApiKey};
pub use model::Session;
pub use state::SessionState;
