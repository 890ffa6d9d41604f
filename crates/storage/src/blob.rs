//! Blob storage for raw uploaded files (S3/MinIO compatible).

use bytes::Bytes;
use object_store::{aws::AmazonS3Builder, local::LocalFileSystem, memory::InMemory, path::Path,
    ObjectStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use usage_common::{UsageError, UsageResult};

/// Configuration for an S3-compatible blob storage connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobStorageConfig {
    /// S3/MinIO endpoint URL
    pub endpoint: String,
    /// Bucket name
    pub bucket: String,
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// AWS region (use "us-east-1" for MinIO)
    pub region: String,
    /// Allow HTTP (for local MinIO)
    pub allow_http: bool,
}

impl Default for BlobStorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://minio:9000".to_string(),
            bucket: "energy-uploads".to_string(),
            access_key_id: "minioadmin".to_string(),
            secret_access_key: "minioadmin".to_string(),
            region: "us-east-1".to_string(),
            allow_http: true,
        }
    }
}

/// Blob storage client for raw upload content.
///
/// Uploaded files are stored verbatim under their client-supplied
/// filename; the pipeline never reads them back.
pub struct BlobStorage {
    store: Arc<dyn ObjectStore>,
    label: String,
}

impl BlobStorage {
    /// Create a client backed by an S3-compatible store.
    pub fn s3(config: &BlobStorageConfig) -> UsageResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_endpoint(&config.endpoint)
            .with_bucket_name(&config.bucket)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_region(&config.region);

        if config.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| UsageError::StorageError(format!("Failed to create S3 client: {}", e)))?;

        Ok(Self {
            store: Arc::new(store),
            label: config.bucket.clone(),
        })
    }

    /// Create a client backed by a local directory.
    ///
    /// The directory is created if missing. This covers deployments that
    /// mimic S3 with a plain directory on disk.
    pub fn local(dir: &str) -> UsageResult<Self> {
        std::fs::create_dir_all(dir)?;
        let store = LocalFileSystem::new_with_prefix(dir).map_err(|e| {
            UsageError::StorageError(format!("Failed to open blob dir {}: {}", dir, e))
        })?;

        Ok(Self {
            store: Arc::new(store),
            label: dir.to_string(),
        })
    }

    /// Create an in-memory client (tests).
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            label: "memory".to_string(),
        }
    }

    /// Write bytes under a filename.
    #[instrument(skip(self, data), fields(store = %self.label, path = %path))]
    pub async fn put(&self, path: &str, data: Bytes) -> UsageResult<()> {
        let location = Path::from(path);
        debug!(size = data.len(), "Writing blob");

        self.store
            .put(&location, data.into())
            .await
            .map_err(|e| UsageError::StorageError(format!("Failed to write {}: {}", path, e)))?;

        Ok(())
    }

    /// Read bytes back (tests and tooling only; the pipeline never reads).
    #[instrument(skip(self), fields(store = %self.label, path = %path))]
    pub async fn get(&self, path: &str) -> UsageResult<Bytes> {
        let location = Path::from(path);

        let result = self
            .store
            .get(&location)
            .await
            .map_err(|e| UsageError::StorageError(format!("Failed to read {}: {}", path, e)))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| UsageError::StorageError(format!("Failed to read bytes: {}", e)))?;

        debug!(size = bytes.len(), "Read blob");
        Ok(bytes)
    }
}
