use tracing::debug;

use crate::models::StoredReading;
use crate::storage::{KeyValueStorage, StorageError};

/// Fixed storage key for the blood pressure readings collection
pub const READINGS_KEY: &str = "blood-pressure-readings";

/// Repository for the persisted readings collection.
///
/// The whole collection lives under one key as a JSON array and is rewritten
/// on every save.
#[derive(Debug, Clone)]
pub struct ReadingsRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> ReadingsRepository<S> {
    /// Create a repository using the default readings key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, READINGS_KEY)
    }

    /// Create a repository storing under a custom key
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted collection. A missing key is an empty collection.
    pub fn load(&self) -> Result<Vec<StoredReading>, StorageError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => {
                let readings: Vec<StoredReading> = serde_json::from_str(&raw)?;
                debug!("Loaded {} readings from key {}", readings.len(), self.key);
                Ok(readings)
            }
            None => {
                debug!("No readings stored under key {}", self.key);
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the persisted collection
    pub fn save(&self, readings: &[StoredReading]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(readings)?;
        self.storage.set_item(&self.key, &raw)?;
        debug!("Saved {} readings under key {}", readings.len(), self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    fn stored(systolic: u16, diastolic: u16, date: &str) -> StoredReading {
        StoredReading {
            systolic,
            diastolic,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let repository = ReadingsRepository::new(InMemoryStorage::new());
        assert!(repository.load().unwrap().is_empty());
        assert_eq!(repository.key(), READINGS_KEY);
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let storage = InMemoryStorage::new();
        let repository = ReadingsRepository::new(storage.clone());
        let readings = vec![
            stored(130, 85, "2025-06-14T08:00:00.000Z"),
            stored(120, 80, "2025-06-13T08:00:00.000Z"),
            stored(120, 80, "2025-06-13T08:00:00.000Z"),
        ];

        repository.save(&readings).unwrap();

        let reloaded = ReadingsRepository::new(storage);
        assert_eq!(reloaded.load().unwrap(), readings);
    }

    #[test]
    fn test_corrupt_value_is_serialization_error() {
        let storage = InMemoryStorage::new();
        storage.set_item(READINGS_KEY, "{not json").unwrap();

        let repository = ReadingsRepository::new(storage);
        assert!(matches!(repository.load(), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_custom_key() {
        let storage = InMemoryStorage::new();
        let repository = ReadingsRepository::with_key(storage.clone(), "other");
        repository.save(&[stored(110, 70, "2025-01-01T00:00:00.000Z")]).unwrap();

        assert!(storage.get_item(READINGS_KEY).unwrap().is_none());
        assert!(storage.get_item("other").unwrap().is_some());
    }
}
