//! In-memory blob store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{BlobStore, StoreError, StoreResult};

/// In-memory blob store, contents are lost when dropped
#[derive(Default, Clone)]
pub struct InMemoryBlobStore {
    containers: Arc<RwLock<HashMap<String, HashMap<String, String>>>>,
}

impl InMemoryBlobStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys held by a container, sorted
    pub async fn keys(&self, container: &str) -> Vec<String> {
        let containers = self.containers.read().await;
        let mut keys: Vec<String> = containers
            .get(container)
            .map(|blobs| blobs.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, container: &str, key: &str) -> StoreResult<String> {
        let containers = self.containers.read().await;
        containers
            .get(container)
            .and_then(|blobs| blobs.get(key))
            .cloned()
            .ok_or_else(|| StoreError::not_found(container, key))
    }

    async fn put(&self, container: &str, key: &str, text: &str) -> StoreResult<()> {
        let mut containers = self.containers.write().await;
        match containers.get_mut(container) {
            Some(blobs) => {
                blobs.insert(key.to_string(), text.to_string());
                Ok(())
            }
            None => Err(StoreError::Unavailable(format!(
                "container '{}' does not exist",
                container
            ))),
        }
    }

    fn uri(&self, container: &str, key: &str) -> String {
        format!("memory://{}/{}", container, key)
    }

    async fn container_exists(&self, container: &str) -> bool {
        self.containers.read().await.contains_key(container)
    }

    async fn create_container(&self, container: &str) -> StoreResult<()> {
        let mut containers = self.containers.write().await;
        containers.entry(container.to_string()).or_default();
        Ok(())
    }
}
