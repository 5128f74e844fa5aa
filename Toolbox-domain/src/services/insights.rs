use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::Reading;

/// Blood pressure category based on measurements
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BloodPressureCategory {
    /// Normal blood pressure (systolic < 120 and diastolic < 80)
    Normal,

    /// Elevated blood pressure (systolic 120-129 and diastolic < 80)
    Elevated,

    /// Stage 1 Hypertension (systolic 130-139 or diastolic 80-89)
    Hypertension1,

    /// Stage 2 Hypertension (systolic ≥ 140 or diastolic ≥ 90)
    Hypertension2,

    /// Hypertensive crisis (systolic ≥ 180 and/or diastolic ≥ 120)
    HypertensiveCrisis,
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Hypertension1 => "Hypertension Stage 1",
            BloodPressureCategory::Hypertension2 => "Hypertension Stage 2",
            BloodPressureCategory::HypertensiveCrisis => "Hypertensive Crisis",
        };
        f.write_str(label)
    }
}

/// Categorize blood pressure based on measurements
pub fn categorize_blood_pressure(systolic: u16, diastolic: u16) -> BloodPressureCategory {
    if systolic >= 180 || diastolic >= 120 {
        BloodPressureCategory::HypertensiveCrisis
    } else if systolic >= 140 || diastolic >= 90 {
        BloodPressureCategory::Hypertension2
    } else if systolic >= 130 || diastolic >= 80 {
        BloodPressureCategory::Hypertension1
    } else if systolic >= 120 {
        BloodPressureCategory::Elevated
    } else {
        BloodPressureCategory::Normal
    }
}

/// Category of a single reading
pub fn categorize_reading(reading: &Reading) -> BloodPressureCategory {
    categorize_blood_pressure(reading.systolic(), reading.diastolic())
}

/// Summary statistics over a set of readings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingsSummary {
    /// Number of readings analyzed
    pub reading_count: usize,
    pub avg_systolic: f64,
    pub avg_diastolic: f64,
    pub max_systolic: u16,
    pub max_diastolic: u16,
    pub min_systolic: u16,
    pub min_diastolic: u16,
    /// Category of the averaged reading
    pub category: BloodPressureCategory,
    /// Earliest reading in the set
    pub first_taken: DateTime<Utc>,
    /// Latest reading in the set
    pub last_taken: DateTime<Utc>,
}

/// Summarize readings; `None` when there is nothing to summarize
pub fn summarize(readings: &[Reading]) -> Option<ReadingsSummary> {
    let first = readings.first()?;

    let mut summary = ReadingsSummary {
        reading_count: readings.len(),
        avg_systolic: 0.0,
        avg_diastolic: 0.0,
        max_systolic: first.systolic(),
        max_diastolic: first.diastolic(),
        min_systolic: first.systolic(),
        min_diastolic: first.diastolic(),
        category: BloodPressureCategory::Normal,
        first_taken: first.timestamp(),
        last_taken: first.timestamp(),
    };

    let mut sum_systolic = 0.0;
    let mut sum_diastolic = 0.0;

    for reading in readings {
        sum_systolic += reading.systolic() as f64;
        sum_diastolic += reading.diastolic() as f64;

        summary.max_systolic = summary.max_systolic.max(reading.systolic());
        summary.max_diastolic = summary.max_diastolic.max(reading.diastolic());
        summary.min_systolic = summary.min_systolic.min(reading.systolic());
        summary.min_diastolic = summary.min_diastolic.min(reading.diastolic());
        summary.first_taken = summary.first_taken.min(reading.timestamp());
        summary.last_taken = summary.last_taken.max(reading.timestamp());
    }

    summary.avg_systolic = sum_systolic / readings.len() as f64;
    summary.avg_diastolic = sum_diastolic / readings.len() as f64;
    summary.category = categorize_blood_pressure(
        summary.avg_systolic.round() as u16,
        summary.avg_diastolic.round() as u16,
    );

    Some(summary)
}

/// Check if a reading indicates a hypertensive crisis
pub fn is_hypertensive_crisis(reading: &Reading) -> bool {
    categorize_reading(reading) == BloodPressureCategory::HypertensiveCrisis
}
