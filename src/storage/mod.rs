//! Blob storage for pipeline artifacts
//!
//! Agents pass text artifacts between stages through a [`BlobStore`]:
//! - S3 (LocalStack or AWS)
//! - Local directory (one sub-directory per container)
//! - In-memory (tests, dry runs)

mod file;
mod in_memory;
mod s3;

pub use file::FileBlobStore;
pub use in_memory::InMemoryBlobStore;
pub use s3::S3BlobStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{StorageBackend, StorageSettings};

/// Errors raised by blob stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key does not exist in the container
    #[error("Blob '{key}' not found in container '{container}'")]
    NotFound { container: String, key: String },

    /// The store could not be reached or rejected the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(container: &str, key: &str) -> Self {
        StoreError::NotFound {
            container: container.to_string(),
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Key/value text store addressed by container and key.
///
/// Keys may contain `/`; stores treat it as an organizational prefix only.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a blob
    async fn get(&self, container: &str, key: &str) -> StoreResult<String>;

    /// Create or overwrite a blob
    async fn put(&self, container: &str, key: &str, text: &str) -> StoreResult<()>;

    /// Check whether a container exists. Failures read as `false`.
    async fn container_exists(&self, container: &str) -> bool;

    /// Human-readable address of a blob, used in logs and report headers
    fn uri(&self, container: &str, key: &str) -> String {
        format!("{}/{}", container, key)
    }

    /// Create a container
    async fn create_container(&self, container: &str) -> StoreResult<()>;

    /// Create the container if it is missing, returning whether it was created.
    ///
    /// Check-then-create is not atomic; a concurrent creator is harmless.
    async fn ensure_container(&self, container: &str) -> StoreResult<bool> {
        if self.container_exists(container).await {
            tracing::info!(container, "container already exists");
            return Ok(false);
        }
        self.create_container(container).await?;
        tracing::info!(container, "container created");
        Ok(true)
    }
}

/// Create a blob store from configuration
pub async fn create_store(settings: &StorageSettings) -> StoreResult<Box<dyn BlobStore>> {
    match settings.backend {
        StorageBackend::S3 => Ok(Box::new(S3BlobStore::new(&settings.s3).await)),
        StorageBackend::File => Ok(Box::new(FileBlobStore::new(&settings.file_root)?)),
        StorageBackend::Memory => Ok(Box::new(InMemoryBlobStore::new())),
    }
}
