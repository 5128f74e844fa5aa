//! Storage configuration
//!
//! The backend is chosen from environment variables:
//! - `TOOLBOX_STORAGE`: `memory`, `file` (default) or `sqlite`
//! - `DATA_DIR`: directory for file storage and the default database file
//! - `DB_SQLITE_PATH`: explicit SQLite database path
//! - `DB_POOL_SIZE`, `DB_TIMEOUT_SECONDS`: SQLite pool tuning

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
#[cfg(feature = "sqlite")]
use std::time::Duration;

use tracing::info;

use super::errors::StorageError;
use super::{DynStorage, FileStorage, InMemoryStorage};
#[cfg(feature = "sqlite")]
use super::SqliteStorage;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local map, lost on exit
    Memory,
    /// One JSON file per key
    File,
    /// SQLite database file
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(StorageError::Config(format!("Unsupported storage backend: {s}"))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Which backend to open
    pub backend: StorageBackend,
    /// Directory for file storage
    pub data_dir: PathBuf,
    /// Path to the SQLite database file, defaults to `<data_dir>/toolbox.db`
    pub sqlite_path: Option<PathBuf>,
    /// SQLite connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from("data"),
            sqlite_path: None,
            pool_size: 4,
            timeout_seconds: 30,
        }
    }
}

impl StorageConfig {
    /// Create a storage configuration from environment variables
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create a storage configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("TOOLBOX_STORAGE") {
            Some(value) => value.parse()?,
            None => defaults.backend,
        };

        let data_dir = lookup("DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let sqlite_path = lookup("DB_SQLITE_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let pool_size = lookup("DB_POOL_SIZE")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.pool_size);

        let timeout_seconds = lookup("DB_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_seconds);

        Ok(Self {
            backend,
            data_dir,
            sqlite_path,
            pool_size,
            timeout_seconds,
        })
    }

    /// Effective SQLite database path
    pub fn sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("toolbox.db"))
    }
}

/// Open the backend described by `config`
pub fn open_storage(config: &StorageConfig) -> Result<DynStorage, StorageError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data will not survive this process");
            Ok(Box::new(InMemoryStorage::new()))
        }
        StorageBackend::File => {
            info!("Using file storage in {}", config.data_dir.display());
            Ok(Box::new(FileStorage::new(&config.data_dir)?))
        }
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => {
            let path = config.sqlite_path();
            info!("Using SQLite storage at {}", path.display());
            let storage = SqliteStorage::open(
                &path,
                config.pool_size,
                Duration::from_secs(config.timeout_seconds),
            )?;
            Ok(Box::new(storage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStorage;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorageConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StorageConfig::default());
        assert_eq!(config.sqlite_path(), PathBuf::from("data").join("toolbox.db"));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            ("TOOLBOX_STORAGE", "Memory"),
            ("DATA_DIR", "/tmp/toolbox"),
            ("DB_SQLITE_PATH", "/tmp/other.db"),
            ("DB_POOL_SIZE", "8"),
            ("DB_TIMEOUT_SECONDS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/toolbox"));
        assert_eq!(config.sqlite_path(), PathBuf::from("/tmp/other.db"));
        assert_eq!(config.pool_size, 8);
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            ("DB_POOL_SIZE", "lots"),
            ("DB_TIMEOUT_SECONDS", "-1"),
        ]))
        .unwrap();

        assert_eq!(config.pool_size, 4);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let result = StorageConfig::from_lookup(lookup_from(&[("TOOLBOX_STORAGE", "redis")]));
        assert!(matches!(result, Err(StorageError::Config(_))));
    }

    #[test]
    fn test_open_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: dir.path().join("store"),
            ..StorageConfig::default()
        };

        let storage = open_storage(&config).unwrap();
        storage.set_item("key", "value").unwrap();
        assert!(dir.path().join("store").join("key.json").exists());
    }
}
