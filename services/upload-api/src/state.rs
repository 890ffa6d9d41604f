//! Shared application state.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use ingestion::IngestionPipeline;
use storage::{BlobStorage, PgRecordStore};

use crate::config::{BlobBackend, ServiceConfig};

/// State shared by all request handlers.
pub struct AppState {
    /// Core ingestion pipeline
    pub pipeline: IngestionPipeline,
    /// Threshold applied when the request does not carry one
    pub default_threshold: f64,
}

impl AppState {
    /// Wire up storage collaborators from configuration.
    pub async fn new(config: ServiceConfig) -> Result<Self> {
        let blobs = match &config.blob {
            BlobBackend::S3(s3) => {
                info!(endpoint = %s3.endpoint, bucket = %s3.bucket, "Using S3 blob storage");
                BlobStorage::s3(s3)?
            }
            BlobBackend::Local { dir } => {
                info!(dir = %dir, "Using local blob storage");
                BlobStorage::local(dir)?
            }
        };

        let records = PgRecordStore::connect(&config.database_url).await?;
        records.migrate().await?;
        info!("Record store ready");

        let default_threshold = config.pipeline.default_threshold;
        let pipeline =
            IngestionPipeline::new(Arc::new(blobs), Arc::new(records), config.pipeline);

        Ok(Self {
            pipeline,
            default_threshold,
        })
    }
}
