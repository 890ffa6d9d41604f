//! Persistence of validated readings.

use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use storage::RecordStore;
use usage_common::{Reading, UsageError, UsageResult};

/// Writes validated readings to the record store.
///
/// Each write is independent; the pipeline folds a failure into an
/// informational alert and continues with the next row.
pub struct Persister {
    records: Arc<dyn RecordStore>,
    user_id: String,
}

impl Persister {
    pub fn new(records: Arc<dyn RecordStore>, user_id: impl Into<String>) -> Self {
        Self {
            records,
            user_id: user_id.into(),
        }
    }

    /// Write-or-overwrite the reading under `(user_id, date)`.
    ///
    /// The usage value is converted through its decimal string rendering
    /// rather than the binary float, so `40.1` is stored as exactly
    /// `40.1`.
    pub async fn persist(&self, reading: &Reading) -> UsageResult<()> {
        let usage = Decimal::from_str(&reading.usage.to_string()).map_err(|e| {
            UsageError::InternalError(format!(
                "usage {} is not representable as a decimal: {}",
                reading.usage, e
            ))
        })?;

        self.records
            .put_reading(&self.user_id, &reading.date, usage)
            .await?;

        debug!(user_id = %self.user_id, date = %reading.date, usage = %usage, "Persisted reading");
        Ok(())
    }

    /// The fixed identity readings are recorded under.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
