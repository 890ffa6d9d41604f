//! CSV decoding and header validation.

use csv::StringRecord;
use usage_common::{Alert, UsageError, UsageResult};

/// Decodes file content as CSV and validates the header line.
///
/// A header that does not exactly match the expected schema is the one
/// condition that fails the whole request; every other degenerate shape
/// (no records, no data rows) is reported as an informational alert.
#[derive(Debug, Clone)]
pub struct RecordParser {
    expected_header: Vec<String>,
}

impl RecordParser {
    /// Create a parser expecting the given header fields, in order.
    pub fn new(expected_header: Vec<String>) -> Self {
        Self { expected_header }
    }

    /// Parse content into data rows.
    ///
    /// Returns the data rows (everything after the header) plus any
    /// informational alerts. Fails with [`UsageError::InvalidEncoding`]
    /// for non-UTF-8 content and [`UsageError::SchemaMismatch`] when the
    /// header differs from the expected schema.
    pub fn parse(
        &self,
        content: &[u8],
        filename: &str,
    ) -> UsageResult<(Vec<StringRecord>, Vec<Alert>)> {
        let text = std::str::from_utf8(content)
            .map_err(|_| UsageError::InvalidEncoding(filename.to_string()))?;

        // Rows may legitimately have the wrong field count; the row
        // validator isolates those, so the reader must not reject them.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record.map_err(|e| {
                UsageError::InternalError(format!("CSV read failed for '{}': {}", filename, e))
            })?,
            None => {
                return Ok((
                    Vec::new(),
                    vec![Alert::NoRecords {
                        filename: filename.to_string(),
                    }],
                ));
            }
        };

        if !self.header_matches(&header) {
            return Err(UsageError::SchemaMismatch {
                filename: filename.to_string(),
                expected: self.expected_header.clone(),
            });
        }

        let mut rows = Vec::new();
        for record in records {
            let record = record.map_err(|e| {
                UsageError::InternalError(format!("CSV read failed for '{}': {}", filename, e))
            })?;
            rows.push(record);
        }

        if rows.is_empty() {
            return Ok((
                Vec::new(),
                vec![Alert::NoDataRows {
                    filename: filename.to_string(),
                }],
            ));
        }

        Ok((rows, Vec::new()))
    }

    /// Exact match: same fields, same order, same case, no extras.
    fn header_matches(&self, header: &StringRecord) -> bool {
        header.len() == self.expected_header.len()
            && header
                .iter()
                .zip(self.expected_header.iter())
                .all(|(got, want)| got == want)
    }
}
