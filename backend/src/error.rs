//! Error types for the mediatrends engine and its boundary layers.
//!
//! - [`DatasetError`] - loading a CSV file into a dataset
//! - [`EngineError`] - structural failures while computing a view
//! - [`ServerError`] - top-level errors seen by the HTTP server and CLI
//!
//! Only structural problems are errors. Values that fail to coerce and
//! filters that leave nothing behind are absorbed by the engine itself.
//! Conversion is automatic via `From`, so `?` works across layers.

use thiserror::Error;

// =============================================================================
// Dataset Loading Errors
// =============================================================================

/// Errors while reading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to read file.
    #[error("Failed to read dataset file: {0}")]
    IoError(#[from] std::io::Error),

    /// Content could not be decoded as text.
    #[error("Failed to decode dataset: {0}")]
    EncodingError(String),

    /// Malformed CSV record.
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// The file has a header but no data rows.
    #[error("Dataset '{0}' has no rows")]
    EmptyFile(String),

    /// No header line.
    #[error("No headers found in dataset '{0}'")]
    NoHeaders(String),
}

// =============================================================================
// Engine Errors
// =============================================================================

/// Structural failures raised by the aggregation engine.
///
/// These are the only faults a view can report; missing values, empty groups
/// and unseen labels degrade to empty or zero-filled output instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A column the view depends on is absent from the dataset schema.
    #[error("Dataset '{dataset}' is missing required column '{column}'")]
    MissingColumn { dataset: String, column: String },

    /// Bin edges are not strictly increasing or labels do not match edges.
    #[error("Invalid bin spec: {0}")]
    InvalidBinSpec(String),

    /// No view is registered under this name.
    #[error("Unknown view '{0}'")]
    UnknownView(String),
}

impl EngineError {
    pub fn missing_column(dataset: impl Into<String>, column: impl Into<String>) -> Self {
        EngineError::MissingColumn {
            dataset: dataset.into(),
            column: column.into(),
        }
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server and CLI errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A dataset could not be loaded at startup.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// A view failed structurally.
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// A request under `/api/` that names no view.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for dataset loading.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let dataset_err = DatasetError::EmptyFile("anime".into());
        let server_err: ServerError = dataset_err.into();
        assert!(server_err.to_string().contains("no rows"));

        let engine_err = EngineError::missing_column("movies", "IMDb");
        let server_err: ServerError = engine_err.into();
        assert!(server_err.to_string().contains("IMDb"));
    }

    #[test]
    fn test_missing_column_format() {
        let msg = EngineError::missing_column("games", "Platform").to_string();
        assert!(msg.contains("games"));
        assert!(msg.contains("'Platform'"));
    }
}
