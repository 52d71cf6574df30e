//! Data source metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the ingested data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path (or upload name).
    pub file: String,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the data was parsed.
    pub parsed_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        file: String,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            file,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            parsed_at: Utc::now(),
        }
    }
}
