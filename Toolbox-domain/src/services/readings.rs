use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use toolbox_data::repository::ReadingsRepository;
use toolbox_data::storage::KeyValueStorage;
use tracing::{debug, error, info, warn};

use crate::dates;
use crate::entities::conversions::{convert_to_data_reading, convert_to_domain_reading};
use crate::entities::{DateRange, Reading};
use crate::errors::ReadingsError;
use crate::services::transfer::{self, ExportPayload, TransferFormat};
use crate::services::views;

/// Owner of the authoritative readings collection.
///
/// The collection is held behind an `Arc` and replaced wholesale on every
/// change, so a snapshot obtained from [`ReadingsStore::readings`] never
/// changes underneath its holder. [`ReadingsStore::revision`] increases with
/// every replacement.
pub struct ReadingsStore<S: KeyValueStorage> {
    repository: ReadingsRepository<S>,
    readings: Arc<Vec<Reading>>,
    revision: u64,
    loaded: bool,
}

impl<S: KeyValueStorage> ReadingsStore<S> {
    /// Create an empty, unloaded store over `storage`
    pub fn new(storage: S) -> Self {
        Self::from_repository(ReadingsRepository::new(storage))
    }

    /// Create an empty, unloaded store persisting under a custom key
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self::from_repository(ReadingsRepository::with_key(storage, key))
    }

    fn from_repository(repository: ReadingsRepository<S>) -> Self {
        Self {
            repository,
            readings: Arc::new(Vec::new()),
            revision: 0,
            loaded: false,
        }
    }

    /// Create a store and load the persisted collection
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// Missing or unreadable data yields an empty collection; the failure is
    /// logged and never returned.
    pub fn load(&mut self) -> Arc<Vec<Reading>> {
        let readings = match self.read_persisted() {
            Ok(readings) => {
                debug!("Loaded {} readings", readings.len());
                readings
            }
            Err(e) => {
                warn!("Could not load stored readings, starting empty: {}", e);
                Vec::new()
            }
        };

        self.loaded = true;
        self.replace(readings);
        self.readings()
    }

    fn read_persisted(&self) -> Result<Vec<Reading>, ReadingsError> {
        self.repository
            .load()?
            .into_iter()
            .map(convert_to_domain_reading)
            .collect()
    }

    /// Persist the current collection, logging any failure
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            error!("Failed to save readings: {}", e);
        }
    }

    /// Persist the current collection
    pub fn try_save(&self) -> Result<(), ReadingsError> {
        let stored: Vec<_> = self.readings.iter().map(convert_to_data_reading).collect();
        self.repository.save(&stored)?;
        Ok(())
    }

    /// Append a reading and persist
    pub fn add(&mut self, reading: Reading) {
        let mut next = Vec::with_capacity(self.readings.len() + 1);
        next.extend(self.readings.iter().cloned());
        next.push(reading);

        self.replace(next);
        self.save();
    }

    /// Manual entry: a reading on `day` at the current local time of day.
    /// Days after today are rejected.
    pub fn record(
        &mut self,
        systolic: u16,
        diastolic: u16,
        day: NaiveDate,
    ) -> Result<Reading, ReadingsError> {
        if day > dates::today() {
            return Err(ReadingsError::Validation(format!(
                "Cannot record a reading for a future day ({day})"
            )));
        }

        let reading = Reading::on_day(systolic, diastolic, day, Local::now().time())?;
        self.add(reading.clone());
        info!("Recorded reading {}/{} for {}", systolic, diastolic, day);
        Ok(reading)
    }

    /// Replace the collection with the contents of an import file.
    ///
    /// Returns the number of imported readings. On error the collection is
    /// left untouched.
    pub fn import_from(
        &mut self,
        content: &str,
        format: TransferFormat,
    ) -> Result<usize, ReadingsError> {
        let imported = transfer::import_from(content, format)?;
        let count = imported.len();

        self.replace(imported);
        self.save();
        info!("Imported {} readings from {}", count, format.label());
        Ok(count)
    }

    /// Read a `.json` or `.csv` file and import it
    pub async fn import_file(&mut self, path: impl AsRef<Path>) -> Result<usize, ReadingsError> {
        let path = path.as_ref();
        let format = TransferFormat::from_path(path)?;

        debug!("Reading import file {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;

        self.import_from(&content, format)
    }

    /// Serialize the collection, naming the file after today's UTC date
    pub fn export_to(&self, format: TransferFormat) -> Result<ExportPayload, ReadingsError> {
        self.export_to_on(format, Utc::now().date_naive())
    }

    /// Serialize the collection, naming the file after `today`
    pub fn export_to_on(
        &self,
        format: TransferFormat,
        today: NaiveDate,
    ) -> Result<ExportPayload, ReadingsError> {
        let payload = transfer::export_to(&self.readings, format, today)?;
        info!("Exported {} readings as {}", self.readings.len(), payload.filename);
        Ok(payload)
    }

    /// Readings on a local calendar day, ascending
    pub fn filter_by_day(&self, day: NaiveDate) -> Vec<Reading> {
        views::filter_by_day(&self.readings, day)
    }

    /// Readings inside a local date range, ascending
    pub fn filter_by_range(&self, range: Option<&DateRange>) -> Vec<Reading> {
        views::filter_by_range(&self.readings, range)
    }

    /// Snapshot of the current collection in insertion order
    pub fn readings(&self) -> Arc<Vec<Reading>> {
        Arc::clone(&self.readings)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Incremented every time the collection is replaced
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `load` has run
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Storage backend behind the store
    pub fn storage(&self) -> &S {
        self.repository.storage()
    }

    fn replace(&mut self, readings: Vec<Reading>) {
        self.readings = Arc::new(readings);
        self.revision += 1;
    }
}
