use thiserror::Error;
use toolbox_data::storage::StorageError;

/// Broad classification used when reporting an error to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Out-of-range or unparseable reading fields
    Validation,
    /// Unrecognized file type or malformed file shape
    Format,
    /// Persisted-state or file read/write failure
    Storage,
}

/// Problems with the shape of an import file
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    /// File extension is neither `.json` nor `.csv`
    #[error("Unsupported file type {0:?}. Please select a .json or .csv file.")]
    UnsupportedFileType(String),

    /// JSON top level is not an array
    #[error("Invalid JSON format. Expected an array of readings.")]
    NotAnArray,

    /// CSV header lacks a required column
    #[error("Invalid CSV format. Header must contain date, systolic, diastolic (missing {0}).")]
    MissingColumn(&'static str),

    /// File could not be parsed at all
    #[error("Could not parse the file: {0}")]
    Malformed(String),

    /// Readings could not be written in the requested format
    #[error("Could not encode readings: {0}")]
    Encoding(String),
}

/// Errors produced by the readings store and its codecs
#[derive(Debug, Error)]
pub enum ReadingsError {
    /// A reading failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// An import record had a non-numeric measurement or an unparseable date
    #[error("Invalid data found in file (record {record}).")]
    InvalidData {
        /// 1-based position of the offending record
        record: usize,
    },

    /// Export was requested for an empty collection
    #[error("No data to export")]
    NoDataToExport,

    /// Import file had the wrong shape
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Persisted state could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Import file could not be read
    #[error("Could not read the file: {0}")]
    FileRead(#[from] std::io::Error),
}

impl ReadingsError {
    /// Classify the error for reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReadingsError::Validation(_)
            | ReadingsError::InvalidData { .. }
            | ReadingsError::NoDataToExport => ErrorKind::Validation,
            ReadingsError::Format(_) => ErrorKind::Format,
            ReadingsError::Storage(_) | ReadingsError::FileRead(_) => ErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ReadingsError::NoDataToExport.kind(), ErrorKind::Validation);
        assert_eq!(ReadingsError::InvalidData { record: 2 }.kind(), ErrorKind::Validation);
        assert_eq!(
            ReadingsError::from(FormatError::NotAnArray).kind(),
            ErrorKind::Format
        );
        assert_eq!(
            ReadingsError::from(StorageError::Lock("poisoned".to_string())).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_distinct_import_messages() {
        let not_array = ReadingsError::from(FormatError::NotAnArray).to_string();
        let missing = ReadingsError::from(FormatError::MissingColumn("systolic")).to_string();
        let invalid = ReadingsError::InvalidData { record: 3 }.to_string();

        assert!(not_array.contains("Expected an array"));
        assert!(missing.contains("missing systolic"));
        assert!(invalid.contains("Invalid data found"));
        assert_ne!(not_array, missing);
        assert_ne!(missing, invalid);
    }
}
