use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use super::{Storage, StoreError};

/// File-backed store: one JSON document per key under a data directory.
///
/// The desktop analog of the browser's local storage. The directory is
/// created lazily on the first write, so a read-only session never touches
/// the filesystem beyond lookups.
#[derive(Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::new(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::new(key, e))?;
        let path = self.path_for(key);
        debug!("Writing {} bytes to {}", value.len(), path.display());
        fs::write(path, value).map_err(|e| StoreError::new(key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("jobListings").unwrap().is_none());
        store.set("jobListings", "[1,2,3]").unwrap();
        assert_eq!(store.get("jobListings").unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn creates_data_dir_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        let store = FileStore::new(&nested);
        store.set("applicants", "[]").unwrap();
        assert!(nested.join("applicants.json").exists());
    }
}
