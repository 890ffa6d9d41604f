//! Test fixtures: CSV builders and storage fakes.

use async_trait::async_trait;
use bytes::Bytes;
use rust_decimal::Decimal;

use storage::RecordStore;
use usage_common::{UploadFile, UsageError, UsageResult};

/// Join lines into newline-terminated CSV bytes.
pub fn csv_bytes(lines: &[&str]) -> Bytes {
    let mut text = lines.join("\n");
    text.push('\n');
    Bytes::from(text)
}

/// A well-formed two-row usage file (`25` and `40`).
pub fn sample_usage_file(filename: &str) -> UploadFile {
    UploadFile::new(
        filename,
        csv_bytes(&["Date,Usage", "2024-01-01,25", "2024-01-02,40"]),
    )
}

/// Record store that rejects every write.
///
/// Used to exercise the per-row fault isolation: a failed write becomes
/// an alert, never an abort.
#[derive(Default)]
pub struct FailingRecordStore;

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn put_reading(&self, _user_id: &str, _date: &str, _usage: Decimal) -> UsageResult<()> {
        Err(UsageError::DatabaseError("injected failure".to_string()))
    }
}
