//! Error types for source access.

use thiserror::Error;

/// Result type for source access operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching or decoding the input tables.
///
/// Every variant is fatal for a run: the pipeline aborts before any output
/// is written.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required input could not be fetched or read.
    #[error("source `{name}` unavailable: {reason}")]
    SourceUnavailable {
        /// File name of the source under the data host.
        name: String,
        /// Underlying cause.
        reason: String,
    },

    /// A required column is missing or a value failed to parse as its
    /// expected type.
    #[error("source `{name}` malformed: {reason}")]
    SourceFormat {
        /// File name of the source under the data host.
        name: String,
        /// What failed to decode.
        reason: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
