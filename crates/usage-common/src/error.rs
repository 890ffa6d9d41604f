//! Error types for the energy-usage-upload services.

use thiserror::Error;

/// Result type alias using UsageError.
pub type UsageResult<T> = Result<T, UsageError>;

/// Primary error type for upload/ingestion operations.
///
/// Only the client-input variants cross the request boundary as errors;
/// recoverable per-file and per-row conditions become alerts in the
/// response body instead.
#[derive(Debug, Error)]
pub enum UsageError {
    // === Client input errors ===
    #[error("File '{filename}' headers do not match {expected:?}.")]
    SchemaMismatch {
        filename: String,
        expected: Vec<String>,
    },

    #[error("File '{0}' is not valid UTF-8 text.")]
    InvalidEncoding(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Storage errors ===
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Infrastructure errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl UsageError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            UsageError::SchemaMismatch { .. }
            | UsageError::InvalidEncoding(_)
            | UsageError::InvalidParameter { .. } => 400,

            UsageError::StorageError(_)
            | UsageError::DatabaseError(_)
            | UsageError::InternalError(_) => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for UsageError {
    fn from(err: std::io::Error) -> Self {
        UsageError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for UsageError {
    fn from(err: serde_json::Error) -> Self {
        UsageError::InternalError(format!("JSON error: {}", err))
    }
}
