//! Error types for the BiasLens library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for BiasLens operations.
#[derive(Debug, Error)]
pub enum BiasLensError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset could not be ingested, or has no columns or rows.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The requested sensitive attribute is not a column of the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// No eligible rows remained after grouping.
    #[error("Column '{column}' has no eligible values to group (all missing or out of range)")]
    EmptyGroupDistribution { column: String },

    /// A bucket policy failed validation.
    #[error("Invalid bucket policy: {0}")]
    InvalidBucketPolicy(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text generation failed or timed out.
    #[error("Text generation failed: {0}")]
    Generation(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BiasLensError {
    /// Returns true if the error was caused by the caller's input rather
    /// than by the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            BiasLensError::MalformedInput(_)
                | BiasLensError::ColumnNotFound { .. }
                | BiasLensError::EmptyGroupDistribution { .. }
                | BiasLensError::InvalidBucketPolicy(_)
        )
    }
}

/// Result type alias for BiasLens operations.
pub type Result<T> = std::result::Result<T, BiasLensError>;
