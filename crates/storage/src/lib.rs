//! Storage collaborators for the energy-usage-upload services.
//!
//! Two narrow contracts back the ingestion pipeline:
//! - [`BlobStorage`]: raw uploaded files, keyed by filename (S3/MinIO,
//!   local directory, or in-memory).
//! - [`RecordStore`]: parsed readings, keyed by `(user_id, date)` with
//!   last-write-wins semantics (PostgreSQL, or in-memory for tests).

pub mod blob;
pub mod records;

pub use blob::{BlobStorage, BlobStorageConfig};
pub use records::{MemoryRecordStore, PgRecordStore, RecordStore};
