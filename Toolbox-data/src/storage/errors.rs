use std::sync::PoisonError;
use thiserror::Error;

/// Error type for storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[cfg(feature = "sqlite")]
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key cannot be used by this backend
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Configuration error
    #[error("Storage configuration error: {0}")]
    Config(String),
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(error: PoisonError<T>) -> Self {
        StorageError::Lock(error.to_string())
    }
}
