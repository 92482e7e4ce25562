//! Directory-backed blob store

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use super::{BlobStore, StoreError, StoreResult};

/// Blob store that maps containers to directories under a root and keys to
/// relative file paths
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Create a new file store, creating the root directory if needed
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create directory {}: {}", root.display(), e))
        })?;

        Ok(Self { root })
    }

    fn container_path(&self, container: &str) -> StoreResult<PathBuf> {
        Ok(self.root.join(Self::relative(container)?))
    }

    fn blob_path(&self, container: &str, key: &str) -> StoreResult<PathBuf> {
        Ok(self.container_path(container)?.join(Self::relative(key)?))
    }

    /// Reject names that would escape the root
    fn relative(name: &str) -> StoreResult<&Path> {
        let path = Path::new(name);
        let escapes = name.is_empty()
            || path
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(StoreError::Unavailable(format!("invalid blob path '{}'", name)));
        }
        Ok(path)
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, container: &str, key: &str) -> StoreResult<String> {
        let path = self.blob_path(container, key)?;

        match fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::not_found(container, key))
            }
            Err(e) => Err(StoreError::Unavailable(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn put(&self, container: &str, key: &str, text: &str) -> StoreResult<()> {
        if !self.container_exists(container).await {
            return Err(StoreError::Unavailable(format!(
                "container '{}' does not exist",
                container
            )));
        }

        let path = self.blob_path(container, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::Unavailable(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&path, text).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    fn uri(&self, container: &str, key: &str) -> String {
        self.blob_path(container, key)
            .unwrap_or_else(|_| self.root.join(container).join(key))
            .display()
            .to_string()
    }

    async fn container_exists(&self, container: &str) -> bool {
        match self.container_path(container) {
            Ok(path) => fs::metadata(&path).await.map(|m| m.is_dir()).unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn create_container(&self, container: &str) -> StoreResult<()> {
        let path = self.container_path(container)?;
        fs::create_dir_all(&path).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to create {}: {}", path.display(), e))
        })
    }
}
