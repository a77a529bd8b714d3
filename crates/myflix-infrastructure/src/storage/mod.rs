//! File-backed storage with atomic writes.

mod atomic_json;
mod json_file_store;

pub use atomic_json::AtomicJsonFile;
pub use json_file_store::JsonFileStore;
