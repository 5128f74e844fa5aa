use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::{debug, info};

use super::errors::StorageError;
use super::KeyValueStorage;

type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

/// SQLite-backed key-value storage
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("max_size", &self.pool.max_size())
            .finish()
    }
}

impl SqliteStorage {
    /// Open (or create) a database file and run migrations
    pub fn open(
        path: impl AsRef<Path>,
        pool_size: u32,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let path = path.as_ref();
        info!("Initializing SQLite storage at: {}", path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

        let pool = r2d2::Pool::builder()
            .max_size(pool_size.max(1))
            .connection_timeout(timeout)
            .build(manager)?;

        Self::with_pool(pool)
    }

    /// In-memory database. The pool holds a single connection so every
    /// operation sees the same database.
    pub fn in_memory() -> Result<Self, StorageError> {
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())?;

        Self::with_pool(pool)
    }

    fn with_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        let conn = pool.get()?;
        run_migrations(&conn)?;
        drop(conn);
        Ok(Self { pool })
    }
}

/// Create the key-value table if it does not exist
fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    debug!("Creating key_value_store table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS key_value_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM key_value_store WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!("Storing {} bytes under key {}", value.len(), key);
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO key_value_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM key_value_store WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_upsert() {
        let storage = SqliteStorage::in_memory().unwrap();

        assert_eq!(storage.get_item("key").unwrap(), None);
        storage.set_item("key", "one").unwrap();
        storage.set_item("key", "two").unwrap();
        assert_eq!(storage.get_item("key").unwrap().as_deref(), Some("two"));

        storage.remove_item("key").unwrap();
        assert_eq!(storage.get_item("key").unwrap(), None);
    }

    #[test]
    fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db").join("toolbox.db");

        {
            let storage = SqliteStorage::open(&path, 2, Duration::from_secs(5)).unwrap();
            storage.set_item("readings", "[]").unwrap();
        }

        let storage = SqliteStorage::open(&path, 2, Duration::from_secs(5)).unwrap();
        assert_eq!(storage.get_item("readings").unwrap().as_deref(), Some("[]"));
    }
}
