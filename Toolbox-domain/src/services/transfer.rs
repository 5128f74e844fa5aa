//! Import and export of readings as JSON or CSV
//!
//! JSON is an array of `{systolic, diastolic, date}` objects. CSV has a
//! header naming `date`, `systolic` and `diastolic` in any order; exports
//! always write them in that order. Imports are all-or-nothing: one bad
//! record rejects the file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde_json::Value;
use toolbox_data::models::StoredReading;
use tracing::debug;

use crate::dates;
use crate::entities::conversions::convert_to_data_reading;
use crate::entities::Reading;
use crate::errors::{FormatError, ReadingsError};

/// CSV columns in export order
pub const CSV_COLUMNS: [&str; 3] = ["date", "systolic", "diastolic"];

/// Prefix of every suggested export filename
pub const EXPORT_FILE_PREFIX: &str = "blood-pressure-readings";

/// Serialization formats for import and export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    Json,
    Csv,
}

impl TransferFormat {
    /// Pick a format from a file's extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(TransferFormat::Json),
            Some("csv") => Ok(TransferFormat::Csv),
            _ => Err(FormatError::UnsupportedFileType(
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )),
        }
    }

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            TransferFormat::Json => "json",
            TransferFormat::Csv => "csv",
        }
    }

    /// MIME type of an exported payload
    pub fn mime_type(&self) -> &'static str {
        match self {
            TransferFormat::Json => "text/json",
            TransferFormat::Csv => "text/csv",
        }
    }

    /// Upper-case name for messages
    pub fn label(&self) -> &'static str {
        match self {
            TransferFormat::Json => "JSON",
            TransferFormat::Csv => "CSV",
        }
    }
}

impl FromStr for TransferFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(TransferFormat::Json),
            "csv" => Ok(TransferFormat::Csv),
            _ => Err(FormatError::UnsupportedFileType(s.to_string())),
        }
    }
}

impl fmt::Display for TransferFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Serialized readings ready to be written to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub content: String,
    pub filename: String,
    pub mime_type: &'static str,
}

/// Parse an import file. Offset-less dates are read in local time.
pub fn import_from(content: &str, format: TransferFormat) -> Result<Vec<Reading>, ReadingsError> {
    import_from_in(content, format, &Local)
}

/// Parse an import file, reading offset-less dates in `tz`
pub fn import_from_in<Tz: TimeZone>(
    content: &str,
    format: TransferFormat,
    tz: &Tz,
) -> Result<Vec<Reading>, ReadingsError> {
    let readings = match format {
        TransferFormat::Json => import_json(content, tz)?,
        TransferFormat::Csv => import_csv(content, tz)?,
    };
    debug!("Parsed {} readings from {} import", readings.len(), format.label());
    Ok(readings)
}

/// Serialize readings. `today` goes into the suggested filename.
pub fn export_to(
    readings: &[Reading],
    format: TransferFormat,
    today: NaiveDate,
) -> Result<ExportPayload, ReadingsError> {
    if readings.is_empty() {
        return Err(ReadingsError::NoDataToExport);
    }

    let content = match format {
        TransferFormat::Json => export_json(readings)?,
        TransferFormat::Csv => export_csv(readings)?,
    };

    Ok(ExportPayload {
        content,
        filename: export_filename(format, today),
        mime_type: format.mime_type(),
    })
}

/// Suggested filename, e.g. `blood-pressure-readings-2025-06-13.csv`
pub fn export_filename(format: TransferFormat, today: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        EXPORT_FILE_PREFIX,
        today.format("%Y-%m-%d"),
        format.extension()
    )
}

fn import_json<Tz: TimeZone>(content: &str, tz: &Tz) -> Result<Vec<Reading>, ReadingsError> {
    let parsed: Value =
        serde_json::from_str(content).map_err(|e| FormatError::Malformed(e.to_string()))?;
    let items = parsed.as_array().ok_or(FormatError::NotAnArray)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let row = RawRow {
                systolic: item.get("systolic").and_then(json_measurement),
                diastolic: item.get("diastolic").and_then(json_measurement),
                timestamp: item.get("date").and_then(|value| json_timestamp(value, tz)),
            };
            row.into_reading()
                .ok_or(ReadingsError::InvalidData { record: index + 1 })
        })
        .collect()
}

fn import_csv<Tz: TimeZone>(content: &str, tz: &Tz) -> Result<Vec<Reading>, ReadingsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FormatError::Malformed(e.to_string()))?
        .clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or(FormatError::MissingColumn(name))
    };
    let date_index = column("date")?;
    let systolic_index = column("systolic")?;
    let diastolic_index = column("diastolic")?;

    let mut readings = Vec::new();
    let mut record_number = 0;
    for record in reader.records() {
        let record = record.map_err(|e| FormatError::Malformed(e.to_string()))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        record_number += 1;

        let row = RawRow {
            systolic: record.get(systolic_index).and_then(text_measurement),
            diastolic: record.get(diastolic_index).and_then(text_measurement),
            timestamp: record
                .get(date_index)
                .and_then(|text| dates::parse_timestamp_in(text, tz)),
        };
        let reading = row.into_reading().ok_or(ReadingsError::InvalidData {
            record: record_number,
        })?;
        readings.push(reading);
    }

    Ok(readings)
}

fn export_json(readings: &[Reading]) -> Result<String, ReadingsError> {
    let stored: Vec<StoredReading> = readings.iter().map(convert_to_data_reading).collect();
    serde_json::to_string_pretty(&stored)
        .map_err(|e| FormatError::Encoding(e.to_string()).into())
}

fn export_csv(readings: &[Reading]) -> Result<String, ReadingsError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    let encoding = |e: csv::Error| FormatError::Encoding(e.to_string());

    writer.write_record(CSV_COLUMNS).map_err(encoding)?;
    for reading in readings {
        writer
            .write_record([
                dates::format_timestamp(&reading.timestamp()),
                reading.systolic().to_string(),
                reading.diastolic().to_string(),
            ])
            .map_err(encoding)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FormatError::Encoding(e.to_string()).into())
}

/// One import record after field extraction, before validation.
/// A `None` field means the value was missing or did not parse.
struct RawRow {
    systolic: Option<f64>,
    diastolic: Option<f64>,
    timestamp: Option<DateTime<Utc>>,
}

impl RawRow {
    fn into_reading(self) -> Option<Reading> {
        let systolic = whole_measurement(self.systolic?)?;
        let diastolic = whole_measurement(self.diastolic?)?;
        Reading::new(systolic, diastolic, self.timestamp?).ok()
    }
}

fn whole_measurement(value: f64) -> Option<u16> {
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u16::MAX) {
        return None;
    }
    Some(value as u16)
}

fn text_measurement(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn json_measurement(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text_measurement(text),
        _ => None,
    }
}

fn json_timestamp<Tz: TimeZone>(value: &Value, tz: &Tz) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => dates::parse_timestamp_in(text, tz),
        Value::Number(number) => number.as_i64().and_then(dates::timestamp_from_millis),
        _ => None,
    }
}
