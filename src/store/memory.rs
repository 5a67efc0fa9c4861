use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{Storage, StoreError};

/// In-memory store, shared across clones.
///
/// Clones hand out the same underlying map, mirroring how a file store's
/// clones all see the same directory. Used as the swappable test double.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::new(key, poisoned()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::new(key, poisoned()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn poisoned() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, "store lock poisoned")
}
