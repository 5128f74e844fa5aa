use std::time::Duration;

use toolbox_data::models::StoredReading;
use toolbox_data::repository::ReadingsRepository;
use toolbox_data::storage::{
    open_storage, FileStorage, InMemoryStorage, KeyValueStorage, SqliteStorage, StorageBackend,
    StorageConfig,
};

fn sample() -> Vec<StoredReading> {
    vec![
        StoredReading {
            systolic: 121,
            diastolic: 79,
            date: "2025-06-13T07:30:00.000Z".to_string(),
        },
        StoredReading {
            systolic: 135,
            diastolic: 88,
            date: "2025-06-12T19:45:00.000Z".to_string(),
        },
    ]
}

// Every backend must behave the same behind the repository
fn exercise_backend<S: KeyValueStorage>(storage: S) {
    let repository = ReadingsRepository::new(storage);
    assert!(repository.load().unwrap().is_empty());

    repository.save(&sample()).unwrap();
    assert_eq!(repository.load().unwrap(), sample());

    repository.save(&[]).unwrap();
    assert!(repository.load().unwrap().is_empty());

    repository.storage().remove_item(repository.key()).unwrap();
    assert_eq!(repository.storage().get_item(repository.key()).unwrap(), None);
}

#[test]
fn test_in_memory_backend() {
    exercise_backend(InMemoryStorage::new());
}

#[test]
fn test_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    exercise_backend(FileStorage::new(dir.path()).unwrap());
}

#[test]
fn test_sqlite_backend() {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteStorage::open(dir.path().join("t.db"), 2, Duration::from_secs(5)).unwrap();
    exercise_backend(storage);
}

#[test]
fn test_boxed_backend_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        backend: StorageBackend::Sqlite,
        data_dir: dir.path().to_path_buf(),
        ..StorageConfig::default()
    };

    exercise_backend(open_storage(&config).unwrap());
    assert!(dir.path().join("toolbox.db").exists());
}
