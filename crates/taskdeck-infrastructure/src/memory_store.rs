//! In-memory key-value store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use taskdeck_core::error::Result;
use taskdeck_core::storage::KeyValueStore;

/// `HashMap`-backed store for tests and ephemeral sessions. Nothing survives
/// the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys. Handy for asserting the persisted surface.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryKeyValueStore::new();
        assert!(store.is_empty());

        store.set("access_token", "A").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), Some("A".to_string()));
        assert_eq!(store.len(), 1);

        store.remove("access_token").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), None);
        store.remove("access_token").await.unwrap();
    }
}
