//! Reference-table retrieval.
//!
//! The grid API loads its reference CSVs either from an S3-compatible
//! object store or from the local filesystem. Both are exposed behind the
//! [`ReferenceTableSource`] trait so the service is indifferent to where a
//! table lives.

mod object_store_source;

pub use object_store_source::{ObjectStorageConfig, ObjectStoreSource};

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use wrf_common::{GridError, GridResult};

/// Something a reference table can be fetched from.
#[async_trait]
pub trait ReferenceTableSource: Send + Sync {
    /// Fetch the table content as UTF-8 text.
    async fn fetch(&self, name: &str) -> GridResult<String>;

    /// Human-readable description of where tables come from, for logs.
    fn describe(&self) -> String;
}

/// Reference tables read from a directory on the local filesystem.
pub struct LocalFileSource {
    root: PathBuf,
}

impl LocalFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ReferenceTableSource for LocalFileSource {
    async fn fetch(&self, name: &str) -> GridResult<String> {
        let path = self.root.join(name);
        debug!(path = %path.display(), "Reading reference table from disk");
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            GridError::StorageError(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    fn describe(&self) -> String {
        format!("local directory {}", self.root.display())
    }
}
