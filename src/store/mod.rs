//! Key/value storage boundary backing the repositories.
//!
//! Every repository takes an injected [`Storage`] handle rather than reaching
//! for an ambient global, so the same code runs against a file-backed store in
//! the binary and an in-memory store in tests.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::io;

/// Name of the persisted job collection.
pub const JOBS_KEY: &str = "jobListings";
/// Name of the persisted applicant collection.
pub const APPLICANTS_KEY: &str = "applicants";

/// A named-collection store with string values.
///
/// Handles are cheap to clone and clones observe the same underlying data,
/// so one store can back several repositories at once.
pub trait Storage: Clone {
    /// Read the value stored under `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Storage backend failure
#[derive(Debug)]
pub struct StoreError {
    key: String,
    source: io::Error,
}

impl StoreError {
    pub fn new(key: &str, source: io::Error) -> Self {
        StoreError {
            key: key.to_string(),
            source,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage access failed for '{}': {}", self.key, self.source)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
