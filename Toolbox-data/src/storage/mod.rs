// Storage module structure
pub mod errors;
pub mod config;
mod in_memory;
mod file;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::sync::Arc;

// Re-export commonly used types
pub use errors::StorageError;
pub use config::{open_storage, StorageBackend, StorageConfig};
pub use in_memory::InMemoryStorage;
pub use file::FileStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;

/// A string-keyed, string-valued persistent store.
///
/// This plays the role of the browser's local storage: each tool owns a
/// fixed key and rewrites the whole value on every change.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait KeyValueStorage {
    /// Read the value stored under `key`, `None` if nothing was stored
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Boxed storage backend selected at runtime
pub type DynStorage = Box<dyn KeyValueStorage + Send + Sync>;
