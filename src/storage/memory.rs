//! In-process storage backend.

use super::{Storage, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::trace;

/// A [`Storage`] backed by a `HashMap` behind a `RwLock`.
///
/// Contents live as long as the value does. Clone the surrounding `Arc` to
/// hand the same store to a provider and to a test that inspects it.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single key.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut data = HashMap::new();
        data.insert(key.into(), value.into());
        Self {
            data: RwLock::new(data),
        }
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.data.read().await.get(key).cloned();
        trace!(key, found = value.is_some(), "get_item");
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        trace!(key, bytes = value.len(), "set_item");
        self.data.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        trace!(key, "remove_item");
        self.data.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").await.unwrap(), None);

        storage.set_item("k", "v1".to_string()).await.unwrap();
        storage.set_item("k", "v2".to_string()).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len().await, 1);

        storage.remove_item("k").await.unwrap();
        assert!(storage.is_empty().await);

        // Removing again is fine
        storage.remove_item("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_with_item() {
        let storage = MemoryStorage::with_item("cart", "[]");
        assert_eq!(storage.get_item("cart").await.unwrap().as_deref(), Some("[]"));
    }
}
