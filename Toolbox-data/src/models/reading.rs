use serde::{Deserialize, Serialize};

/// Storage model for a blood pressure reading.
///
/// This is the shape written under the readings key and the shape of every
/// JSON export, so the field order here is the field order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReading {
    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// When the reading was taken, as an ISO-8601 string
    pub date: String,
}
