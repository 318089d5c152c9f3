//! Custom error types for cost-splitter
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for cost-splitter operations
#[derive(Error, Debug)]
pub enum CostSplitError {
    /// Configuration-related errors (missing or malformed keys)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reading errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Remote object fetch errors
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Archive extraction errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// The monthly archive was not present after the fetch step
    #[error("File {} not downloaded from bucket", path.display())]
    ArchiveMissing { path: PathBuf },

    /// A required column is absent from the export header
    #[error("Column not found in export header: {column}")]
    MissingColumn { column: String },

    /// A cost cell could not be parsed as a number
    #[error("Invalid amount on row {row}: '{value}'")]
    InvalidAmount { row: usize, value: String },

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl CostSplitError {
    /// Create a "missing column" error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is the "archive missing" condition
    pub fn is_archive_missing(&self) -> bool {
        matches!(self, Self::ArchiveMissing { .. })
    }
}

impl From<std::io::Error> for CostSplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for CostSplitError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for CostSplitError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<zip::result::ZipError> for CostSplitError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

/// Result type alias for cost-splitter operations
pub type CostSplitResult<T> = Result<T, CostSplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CostSplitError::Config("missing keys: bucket_name".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing keys: bucket_name"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_column_error() {
        let err = CostSplitError::missing_column("BlendedCost");
        assert_eq!(
            err.to_string(),
            "Column not found in export header: BlendedCost"
        );
    }

    #[test]
    fn test_archive_missing_error() {
        let err = CostSplitError::ArchiveMissing {
            path: PathBuf::from("reports/billing-2025-01.csv.zip"),
        };
        assert_eq!(
            err.to_string(),
            "File reports/billing-2025-01.csv.zip not downloaded from bucket"
        );
        assert!(err.is_archive_missing());
    }

    #[test]
    fn test_invalid_amount_error() {
        let err = CostSplitError::InvalidAmount {
            row: 4,
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "Invalid amount on row 4: 'abc'");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CostSplitError = io_err.into();
        assert!(matches!(err, CostSplitError::Io(_)));
    }
}
