use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::StorageError;
use super::KeyValueStorage;

/// In-memory storage implementation.
///
/// Clones share the same underlying map, so a clone handed to a store can be
/// inspected from a test afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.items.lock()?.len())
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock()?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock()?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock()?;
        items.remove(key);
        Ok(())
    }
}
