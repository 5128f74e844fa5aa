use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, SubsecRound, TimeZone, Utc};
use validator::{Validate, ValidationErrors};

use crate::dates;
use crate::errors::ReadingsError;

/// Lowest accepted systolic or diastolic value
pub const MIN_MEASUREMENT: u16 = 30;

/// Highest accepted systolic or diastolic value
pub const MAX_MEASUREMENT: u16 = 300;

/// One timestamped blood pressure measurement.
///
/// Fields are private so a `Reading` can only exist with both measurements
/// inside `[MIN_MEASUREMENT, MAX_MEASUREMENT]`.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Reading {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 30, max = 300, message = "Invalid systolic value"))]
    systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 30, max = 300, message = "Invalid diastolic value"))]
    diastolic: u16,

    /// When the reading was taken
    timestamp: DateTime<Utc>,
}

impl Reading {
    /// Create a validated reading. The timestamp is truncated to whole
    /// milliseconds, the precision it is persisted and exported with.
    pub fn new(
        systolic: u16,
        diastolic: u16,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ReadingsError> {
        let reading = Self {
            systolic,
            diastolic,
            timestamp: timestamp.trunc_subsecs(3),
        };

        reading
            .validate()
            .map_err(|errors| ReadingsError::Validation(describe_validation_errors(&errors)))?;

        Ok(reading)
    }

    /// Reading for a local calendar day at the given time of day
    pub fn on_day(
        systolic: u16,
        diastolic: u16,
        day: NaiveDate,
        time_of_day: NaiveTime,
    ) -> Result<Self, ReadingsError> {
        Self::on_day_in(systolic, diastolic, day, time_of_day, &Local)
    }

    /// Reading for a calendar day in `tz` at the given time of day.
    /// A time skipped by a forward clock change moves one hour later.
    pub fn on_day_in<Tz: TimeZone>(
        systolic: u16,
        diastolic: u16,
        day: NaiveDate,
        time_of_day: NaiveTime,
        tz: &Tz,
    ) -> Result<Self, ReadingsError> {
        let local = day.and_time(time_of_day);
        let timestamp = tz
            .from_local_datetime(&local)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
            .ok_or_else(|| {
                ReadingsError::Validation(format!(
                    "{day} {time_of_day} does not exist in the local timezone"
                ))
            })?;

        Self::new(systolic, diastolic, timestamp.with_timezone(&Utc))
    }

    /// Systolic blood pressure
    pub fn systolic(&self) -> u16 {
        self.systolic
    }

    /// Diastolic blood pressure
    pub fn diastolic(&self) -> u16 {
        self.diastolic
    }

    /// When the reading was taken
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Calendar day of the reading in `tz`
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        dates::day_in(&self.timestamp, tz)
    }
}

/// Flatten validator errors into one message, fields in a stable order
fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}
