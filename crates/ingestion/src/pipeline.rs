//! Batch orchestration.

use std::sync::Arc;
use tracing::{debug, info, warn};

use storage::{BlobStorage, RecordStore};
use usage_common::{Alert, IngestionReport, UploadBatch, UsageResult};

use crate::config::PipelineConfig;
use crate::gate::FileGate;
use crate::parser::RecordParser;
use crate::persist::Persister;
use crate::row::RowValidator;
use crate::threshold::ThresholdEvaluator;

/// Orchestrates one upload batch end to end.
///
/// Files are processed sequentially in arrival order, rows in file
/// order, so alerts and exceeded entries come back in production order.
/// Recoverable problems become alerts; only a header-schema mismatch
/// (or a blob-store failure) aborts the batch.
pub struct IngestionPipeline {
    blobs: Arc<BlobStorage>,
    gate: FileGate,
    parser: RecordParser,
    validator: RowValidator,
    persister: Persister,
    evaluator: ThresholdEvaluator,
}

impl IngestionPipeline {
    /// Create a pipeline over the given stores.
    pub fn new(
        blobs: Arc<BlobStorage>,
        records: Arc<dyn RecordStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            blobs,
            gate: FileGate::new(config.allowed_extensions.clone()),
            parser: RecordParser::new(config.expected_header.clone()),
            validator: RowValidator,
            persister: Persister::new(records, config.user_id),
            evaluator: ThresholdEvaluator,
        }
    }

    /// Process a batch and return the accumulated report.
    ///
    /// The report is only returned on success; a schema mismatch in any
    /// file discards everything accumulated so far, by contract.
    pub async fn run(&self, batch: &UploadBatch) -> UsageResult<IngestionReport> {
        let mut report = IngestionReport::new(self.persister.user_id());

        for file in &batch.files {
            self.process_file(file, batch.threshold, &mut report).await?;
        }

        info!(
            files = batch.files.len(),
            alerts = report.alerts.len(),
            exceeded = report.exceeded_thresholds.len(),
            "Batch processed"
        );

        Ok(report)
    }

    async fn process_file(
        &self,
        file: &usage_common::UploadFile,
        threshold: f64,
        report: &mut IngestionReport,
    ) -> UsageResult<()> {
        if let Some(reason) = self.gate.should_skip(&file.filename, &file.content) {
            debug!(filename = %file.filename, "Skipping file");
            report.push_alert(reason);
            return Ok(());
        }

        // Raw bytes first; a blob-store failure is fatal, not an alert.
        self.blobs.put(&file.filename, file.content.clone()).await?;

        let (rows, parse_alerts) = self.parser.parse(&file.content, &file.filename)?;
        report.alerts.extend(parse_alerts);

        for row in &rows {
            let reading = match self.validator.validate(row) {
                Ok(reading) => reading,
                Err(e) => {
                    debug!(filename = %file.filename, error = %e, "Invalid row");
                    report.push_alert(Alert::InvalidRow {
                        filename: file.filename.clone(),
                        row: row.iter().map(str::to_string).collect(),
                    });
                    continue;
                }
            };

            // Threshold evaluation runs whether or not the write landed.
            if let Err(e) = self.persister.persist(&reading).await {
                warn!(filename = %file.filename, date = %reading.date, error = %e, "Store failed");
                report.push_alert(Alert::StoreFailure {
                    filename: file.filename.clone(),
                    date: reading.date.clone(),
                    message: e.to_string(),
                });
            }

            if let Some(entry) = self.evaluator.evaluate(&reading, threshold, &file.filename) {
                report.push_alert(Alert::ThresholdExceeded {
                    date: entry.date.clone(),
                    usage: entry.usage,
                    threshold: entry.threshold,
                    filename: entry.filename.clone(),
                });
                report.exceeded_thresholds.push(entry);
            }
        }

        debug!(filename = %file.filename, rows = rows.len(), "File processed");
        Ok(())
    }
}
