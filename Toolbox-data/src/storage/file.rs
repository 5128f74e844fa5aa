use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::errors::StorageError;
use super::KeyValueStorage;

/// File-backed storage: one `<key>.json` file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        if !root.exists() {
            debug!("Creating storage directory: {}", root.display());
            fs::create_dir_all(&root)?;
        }
        Ok(Self { root })
    }

    /// Directory holding the stored values
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

/// Keys become file names, so they must not escape the root directory
fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key == "."
        || key.contains("..")
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0');
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        debug!("Writing {} bytes to {}", value.len(), path.display());

        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.set_item("readings", "[1,2,3]").unwrap();

        let reopened = FileStorage::new(dir.path()).unwrap();
        assert_eq!(reopened.get_item("readings").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("readings.json").exists());
        assert!(!dir.path().join(".readings.json.tmp").exists());
    }

    #[test]
    fn test_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let storage = FileStorage::new(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(storage.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.remove_item("never-written").unwrap();
        storage.set_item("key", "value").unwrap();
        storage.remove_item("key").unwrap();
        assert_eq!(storage.get_item("key").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        for key in ["", "..", "../escape", "a/b", "a\\b"] {
            let result = storage.set_item(key, "value");
            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
