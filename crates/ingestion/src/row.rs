//! Per-row validation.

use csv::StringRecord;
use thiserror::Error;
use usage_common::Reading;

/// Why a raw row could not become a [`Reading`].
#[derive(Debug, Error)]
pub enum RowError {
    #[error("row has {0} fields, expected at least 2")]
    MissingFields(usize),

    #[error("usage value '{0}' is not a number")]
    BadUsage(String),
}

/// Converts a raw CSV row into a typed [`Reading`].
///
/// Failures here are never fatal; the pipeline turns them into one
/// informational alert per row and moves on.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowValidator;

impl RowValidator {
    /// Validate one raw row.
    ///
    /// Field 0 is the date, kept verbatim (no calendar validation).
    /// Field 1 must parse as a decimal number; surrounding whitespace is
    /// tolerated. Extra fields are ignored.
    pub fn validate(&self, record: &StringRecord) -> Result<Reading, RowError> {
        if record.len() < 2 {
            return Err(RowError::MissingFields(record.len()));
        }

        let date = record.get(0).unwrap_or_default().to_string();
        let raw_usage = record.get(1).unwrap_or_default();

        let usage: f64 = raw_usage
            .trim()
            .parse()
            .map_err(|_| RowError::BadUsage(raw_usage.to_string()))?;

        Ok(Reading { date, usage })
    }
}
