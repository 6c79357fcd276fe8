//! Error types for grid exports

use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for all export operations
///
/// Every variant is raised before any part is rendered, so a failed export
/// never leaves a partial archive behind.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Malformed export options (blank file name, negative width/height)
    #[error("Invalid export option: {0}")]
    InvalidOption(String),

    /// Every column was hidden or cancelled
    #[error("No columns to export: all columns are hidden or cancelled")]
    NoColumnsToExport,

    /// Every row was cancelled
    #[error("No rows to export: all rows were cancelled")]
    NoRowsToExport,

    /// Input is neither a list of records nor a list of scalars
    #[error("Unsupported data shape: {0}")]
    UnsupportedDataShape(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Archive builder failure
    #[error("ZIP error: {0}")]
    ZipError(String),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::ZipError(err.to_string())
    }
}
