//! Threshold evaluation.

use usage_common::{ExceededEntry, Reading};

/// Compares readings against the batch threshold.
///
/// Strictly greater-than: a reading exactly at the threshold does not
/// trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdEvaluator;

impl ThresholdEvaluator {
    /// Return an entry when the reading exceeds the threshold.
    pub fn evaluate(
        &self,
        reading: &Reading,
        threshold: f64,
        filename: &str,
    ) -> Option<ExceededEntry> {
        if reading.usage > threshold {
            Some(ExceededEntry {
                date: reading.date.clone(),
                usage: reading.usage,
                threshold,
                filename: filename.to_string(),
            })
        } else {
            None
        }
    }
}
