//! Error types for the carecheck library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for carecheck operations.
#[derive(Debug, Error)]
pub enum CarecheckError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The table cannot be locked to the canonical schema.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A data row has more fields than the header.
    #[error("Parse error on line {line}: expected {expected} fields, found {found}")]
    Parse {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Empty file or no header to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal schema problems detected while projecting onto the canonical whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// One or more whitelisted columns are absent after standardization.
    #[error("missing canonical column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Two raw labels standardize to the same whitelisted identifier.
    #[error("column '{0}' appears more than once after standardization")]
    DuplicateColumn(String),
}

/// Result type alias for carecheck operations.
pub type Result<T> = std::result::Result<T, CarecheckError>;

impl CarecheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CarecheckError::Io {
            path: path.into(),
            source,
        }
    }
}
