//! Filesystem adapters for the Myflix catalog layer.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::{MyflixPaths, PathError};
pub use storage::{AtomicJsonFile, JsonFileStore};
