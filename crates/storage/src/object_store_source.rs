//! Reference tables fetched from S3-compatible object storage (MinIO/S3).

use std::sync::Arc;

use async_trait::async_trait;
use object_store::{aws::AmazonS3Builder, path::Path, ObjectStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use wrf_common::{GridError, GridResult};

use crate::ReferenceTableSource;

/// Configuration for the object storage connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
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
    /// Key prefix the reference tables live under
    pub prefix: String,
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://minio:9000".to_string(),
            bucket: "wrf-reference".to_string(),
            access_key_id: "minioadmin".to_string(),
            secret_access_key: "minioadmin".to_string(),
            region: "us-east-1".to_string(),
            allow_http: true,
            prefix: "tables".to_string(),
        }
    }
}

/// Reference tables read from a bucket.
pub struct ObjectStoreSource {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    prefix: String,
}

impl ObjectStoreSource {
    pub fn new(config: &ObjectStorageConfig) -> GridResult<Self> {
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
            .map_err(|e| GridError::StorageError(format!("Failed to create S3 client: {}", e)))?;

        Ok(Self {
            store: Arc::new(store),
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
        })
    }

    fn key_for(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.prefix.trim_end_matches('/'), name)
        }
    }
}

#[async_trait]
impl ReferenceTableSource for ObjectStoreSource {
    #[instrument(skip(self), fields(bucket = %self.bucket, name = %name))]
    async fn fetch(&self, name: &str) -> GridResult<String> {
        let location = Path::from(self.key_for(name));

        let result = self
            .store
            .get(&location)
            .await
            .map_err(|e| GridError::StorageError(format!("Failed to read {}: {}", location, e)))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| GridError::StorageError(format!("Failed to read bytes: {}", e)))?;

        debug!(size = bytes.len(), "Fetched reference table");
        String::from_utf8(bytes.to_vec())
            .map_err(|e| GridError::StorageError(format!("Table {} is not UTF-8: {}", name, e)))
    }

    fn describe(&self) -> String {
        format!("s3 bucket {} prefix {}", self.bucket, self.prefix)
    }
}
