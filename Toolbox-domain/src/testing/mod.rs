// Test fixtures shared by unit and integration tests

use chrono::{DateTime, Utc};

use crate::entities::Reading;

pub use toolbox_data::storage::MockKeyValueStorage;

/// Parse an RFC 3339 timestamp, panicking on bad fixtures
pub fn utc(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .unwrap_or_else(|e| panic!("bad fixture timestamp {text:?}: {e}"))
        .with_timezone(&Utc)
}

/// A valid reading taken at an RFC 3339 timestamp
pub fn reading_at(systolic: u16, diastolic: u16, timestamp: &str) -> Reading {
    Reading::new(systolic, diastolic, utc(timestamp))
        .unwrap_or_else(|e| panic!("bad fixture reading {systolic}/{diastolic}: {e}"))
}

/// A week of midday (UTC) readings starting at the given date
pub fn week_of_readings(first_day: &str) -> Vec<Reading> {
    let start = utc(&format!("{first_day}T12:00:00Z"));
    (0..7)
        .map(|offset| {
            let timestamp = start + chrono::Duration::days(offset);
            Reading::new(118 + offset as u16, 76 + offset as u16, timestamp)
                .unwrap_or_else(|e| panic!("bad fixture reading: {e}"))
        })
        .collect()
}
