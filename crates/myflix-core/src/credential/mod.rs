//! Credential domain module.
//!
//! Accounts are identified by e-mail address and authenticated with a
//! secret that doubles as the metadata-service API key.
//!
//! # Security Note
//!
//! Secrets are stored and compared in clear text under the `users` key.
//! This mirrors the demo's storage format; a production deployment must
//! hash secrets and keep API keys out of the credential list.

mod model;
mod store;

pub use model::{Account, CredentialRecord};
pub use store::{CredentialStore, is_valid_email};
