//! Core domain for the Myflix catalog layer.
//!
//! Holds the domain models, the shared error type, the storage abstraction
//! and the stateful components that sit on top of it: credential store,
//! session state, profile registry, profile-scoped collections and the
//! time-boxed response cache. I/O lives in the sibling crates.

pub mod cache;
pub mod catalog;
pub mod collections;
pub mod config;
pub mod credential;
pub mod error;
pub mod profile;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::{MyflixError, Result};
