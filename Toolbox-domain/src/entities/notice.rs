use std::fmt;

use serde::Serialize;

use crate::errors::{ErrorKind, ReadingsError};
use crate::services::transfer::TransferFormat;
use crate::tools::ToolError;

/// How a notice should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A user-facing notification, handed to whatever surface shows toasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub severity: Severity,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            severity: Severity::Success,
        }
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity: Severity::Warning,
        }
    }

    pub fn error(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
            severity: Severity::Error,
        }
    }

    /// A manual reading was stored
    pub fn reading_saved() -> Self {
        Self::success("Success!", "Your blood pressure reading has been saved.")
    }

    /// An import replaced the collection
    pub fn imported(count: usize) -> Self {
        Self::success("Success!", format!("Imported {count} readings."))
    }

    /// An export payload was produced
    pub fn exported(format: TransferFormat) -> Self {
        Self::success("Success!", format!("Data exported as {}.", format.label()))
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.title, description),
            None => write!(f, "{}", self.title),
        }
    }
}

impl From<&ReadingsError> for Notice {
    fn from(error: &ReadingsError) -> Self {
        match error {
            ReadingsError::NoDataToExport => Notice::error("No data to export", None),
            ReadingsError::InvalidData { .. } => {
                Notice::error("Import Failed", Some("Invalid data found in file.".to_string()))
            }
            ReadingsError::Validation(msg) => Notice::error("Invalid reading", Some(msg.clone())),
            ReadingsError::FileRead(_) => Notice::error("Import Failed", Some(error.to_string())),
            other => match other.kind() {
                ErrorKind::Storage => Notice::error("Storage Error", Some(other.to_string())),
                _ => Notice::error("Import Failed", Some(other.to_string())),
            },
        }
    }
}

impl From<&ToolError> for Notice {
    fn from(error: &ToolError) -> Self {
        Notice::error("Error", Some(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FormatError;

    #[test]
    fn test_no_data_notice() {
        let notice = Notice::from(&ReadingsError::NoDataToExport);
        assert_eq!(notice.title, "No data to export");
        assert_eq!(notice.description, None);
        assert!(notice.is_error());
        assert_eq!(notice.to_string(), "No data to export");
    }

    #[test]
    fn test_import_failure_notices() {
        let notice = Notice::from(&ReadingsError::from(FormatError::MissingColumn("date")));
        assert_eq!(notice.title, "Import Failed");
        assert!(notice.description.unwrap().contains("missing date"));

        let notice = Notice::from(&ReadingsError::InvalidData { record: 4 });
        assert_eq!(notice.description.as_deref(), Some("Invalid data found in file."));
    }

    #[test]
    fn test_success_notices() {
        assert_eq!(
            Notice::imported(3).to_string(),
            "Success!: Imported 3 readings."
        );
        assert_eq!(
            Notice::exported(TransferFormat::Csv).description.as_deref(),
            Some("Data exported as CSV.")
        );
        assert_eq!(Notice::reading_saved().severity, Severity::Success);
    }

    #[test]
    fn test_serializes_lowercase_severity() {
        let json = serde_json::to_value(Notice::warning("Nothing to copy.")).unwrap();
        assert_eq!(json["severity"], "warning");
        assert!(json.get("description").is_none());
    }
}
