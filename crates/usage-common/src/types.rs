//! Domain types for upload batches and ingestion results.

use bytes::Bytes;
use serde::Serialize;

use crate::Alert;

/// One submitted file: its client-supplied name and raw content.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content: Bytes,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// A single upload request: ordered files plus one batch-wide threshold.
///
/// Transient; constructed per request and discarded once the report is
/// built.
#[derive(Debug, Clone)]
pub struct UploadBatch {
    pub files: Vec<UploadFile>,
    pub threshold: f64,
}

/// One validated data point extracted from a row.
///
/// The date is an opaque string; no calendar validation is performed.
/// The owning user is pipeline configuration, not part of the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub date: String,
    pub usage: f64,
}

/// One row whose usage exceeded the batch threshold.
///
/// Entries appear in row-processing order within file arrival order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceededEntry {
    pub date: String,
    pub usage: f64,
    pub threshold: f64,
    pub filename: String,
}

/// Aggregate result of processing one batch.
///
/// Built empty at batch start, appended to throughout, returned once at
/// batch end. Rendering to the wire shape (string alerts, camelCase keys)
/// is the HTTP layer's concern.
#[derive(Debug, Clone, Default)]
pub struct IngestionReport {
    pub alerts: Vec<Alert>,
    pub exceeded_thresholds: Vec<ExceededEntry>,
    pub user_id: String,
}

impl IngestionReport {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            alerts: Vec::new(),
            exceeded_thresholds: Vec::new(),
            user_id: user_id.into(),
        }
    }

    pub fn push_alert(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }
}
