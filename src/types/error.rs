//! Error types for the reconciliation engine
//!
//! Matching itself never fails for data-content reasons: malformed records
//! degrade into drops and unmatched payments degrade into exceptions. The
//! variants here cover the I/O shell around the core (file loading, CSV
//! structure, report serialization) plus caller mistakes such as an empty
//! batch identifier.

use thiserror::Error;

/// Main error type for the reconciliation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents the batch from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading inputs or writing outputs
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable at the row level - the malformed row is skipped and
    /// loading continues with the next row.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Report or journal serialization failed
    #[error("Serialization error: {message}")]
    Serialize {
        /// Description of the serialization error
        message: String,
    },

    /// Batch identifier is empty or whitespace
    ///
    /// Programmer-error-class condition: data-quality issues degrade
    /// gracefully, but a batch must always be identifiable.
    #[error("Invalid batch id: '{batch_id}'")]
    InvalidBatchId {
        /// The rejected batch identifier
        batch_id: String,
    },
}

impl From<std::io::Error> for ReconError {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            ReconError::FileNotFound {
                path: error.to_string(),
            }
        } else {
            ReconError::Io {
                message: error.to_string(),
            }
        }
    }
}

impl From<csv::Error> for ReconError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        ReconError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReconError {
    fn from(error: serde_json::Error) -> Self {
        ReconError::Serialize {
            message: error.to_string(),
        }
    }
}

impl ReconError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ReconError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an InvalidBatchId error
    pub fn invalid_batch_id(batch_id: &str) -> Self {
        ReconError::InvalidBatchId {
            batch_id: batch_id.to_string(),
        }
    }
}
