//! Structured alerts produced while processing an upload batch.
//!
//! Alerts are diagnostics, not errors: they are accumulated and returned
//! to the caller alongside a successful result. The legacy wire format is
//! a flat string prefixed with `LOG:` (informational) or `ALERT:`
//! (threshold exceeded); that rendering lives in the `Display` impl so
//! downstream consumers can match on the variant instead of parsing
//! prefixes.

use std::fmt;

/// Broad classification of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Informational: skipped file, malformed row, storage failure.
    Info,
    /// A reading exceeded the caller-supplied threshold.
    Threshold,
}

/// One diagnostic produced while processing a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// File had zero-length content and was skipped.
    EmptyFile { filename: String },

    /// File extension is not in the accepted set; file was skipped.
    UnsupportedExtension { filename: String },

    /// File decoded to zero CSV records.
    NoRecords { filename: String },

    /// File had a valid header but no data rows.
    NoDataRows { filename: String },

    /// A data row was missing fields or had a non-numeric usage value.
    InvalidRow { filename: String, row: Vec<String> },

    /// The record store rejected a write; the row was not persisted.
    StoreFailure {
        filename: String,
        date: String,
        message: String,
    },

    /// A reading's usage exceeded the threshold.
    ThresholdExceeded {
        date: String,
        usage: f64,
        threshold: f64,
        filename: String,
    },
}

impl Alert {
    pub fn kind(&self) -> AlertKind {
        match self {
            Alert::ThresholdExceeded { .. } => AlertKind::Threshold,
            _ => AlertKind::Info,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::EmptyFile { filename } => {
                write!(f, "LOG: File '{}' is empty.", filename)
            }
            Alert::UnsupportedExtension { filename } => {
                write!(
                    f,
                    "LOG: File '{}' is not a .csv or .txt file and was skipped.",
                    filename
                )
            }
            Alert::NoRecords { filename } => {
                write!(f, "LOG: File '{}' is empty.", filename)
            }
            Alert::NoDataRows { filename } => {
                write!(f, "LOG: File '{}' has headers but no data rows.", filename)
            }
            Alert::InvalidRow { filename, row } => {
                write!(f, "LOG: File '{}' has invalid row: {:?}", filename, row)
            }
            Alert::StoreFailure {
                filename,
                date,
                message,
            } => {
                write!(
                    f,
                    "LOG: Record store error for '{}' on {}: {}",
                    filename, date, message
                )
            }
            Alert::ThresholdExceeded {
                date,
                usage,
                threshold,
                filename,
            } => {
                write!(
                    f,
                    "ALERT: Usage of {} on {} in '{}' exceeds threshold of {}",
                    usage, date, filename, threshold
                )
            }
        }
    }
}
