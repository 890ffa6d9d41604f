//! Energy usage ingestion library.
//!
//! Provides the core logic for ingesting delimited energy-usage files:
//! per-file eligibility checks, CSV parsing with header validation,
//! per-row fault isolation, persistence, and threshold evaluation.
//!
//! # Architecture
//!
//! Data flows one way through small, independently testable stages:
//!
//! files -> [`FileGate`] -> [`RecordParser`] -> [`RowValidator`]
//!       -> { [`Persister`], [`ThresholdEvaluator`] } -> [`IngestionReport`]
//!
//! The [`IngestionPipeline`] orchestrates one batch at a time: raw bytes
//! go to blob storage, validated readings go to the record store, and
//! every recoverable problem becomes an alert in the report rather than
//! an error. Only a header-schema mismatch aborts a batch.

pub mod config;
pub mod gate;
pub mod parser;
pub mod persist;
pub mod pipeline;
pub mod row;
pub mod threshold;

// Re-exports
pub use config::PipelineConfig;
pub use gate::FileGate;
pub use parser::RecordParser;
pub use persist::Persister;
pub use pipeline::IngestionPipeline;
pub use row::{RowError, RowValidator};
pub use threshold::ThresholdEvaluator;
pub use usage_common::{Alert, AlertKind, ExceededEntry, IngestionReport, Reading, UploadBatch,
    UploadFile};
