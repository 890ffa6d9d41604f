//! Common types shared across the energy-usage-upload services.

pub mod alert;
pub mod error;
pub mod types;

pub use alert::{Alert, AlertKind};
pub use error::{UsageError, UsageResult};
pub use types::{ExceededEntry, IngestionReport, Reading, UploadBatch, UploadFile};
