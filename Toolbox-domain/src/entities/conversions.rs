use toolbox_data::models::StoredReading;

use crate::dates;
use crate::entities::reading::Reading;
use crate::errors::ReadingsError;

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from data model to domain entity, re-validating the record
pub fn convert_to_domain_reading(stored: StoredReading) -> Result<Reading, ReadingsError> {
    let timestamp = dates::parse_timestamp(&stored.date)
        .ok_or_else(|| ReadingsError::Validation(format!("Invalid timestamp: {}", stored.date)))?;

    Reading::new(stored.systolic, stored.diastolic, timestamp)
}

/// Convert from domain entity to data model
pub fn convert_to_data_reading(reading: &Reading) -> StoredReading {
    StoredReading {
        systolic: reading.systolic(),
        diastolic: reading.diastolic(),
        date: dates::format_timestamp(&reading.timestamp()),
    }
}
