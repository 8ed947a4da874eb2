//! File-backed key-value store.
//!
//! The durable analogue of browser local storage: each key is a single file
//! under a base directory.
//!
//! ```text
//! base_dir/
//! ├── access_token
//! ├── refresh_token
//! └── user
//! ```

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::storage::KeyValueStore;
use tokio::fs;

/// Key-value store persisting each key as one file under `base_dir`.
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `base_dir`, creating the directory if it
    /// doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            TaskdeckError::storage(format!(
                "Failed to create data directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;
        Ok(Self { base_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TaskdeckError::storage(format!(
                "Failed to read '{}': {}",
                key, e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value).await.map_err(|e| {
            TaskdeckError::storage(format!("Failed to write '{}': {}", key, e))
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TaskdeckError::storage(format!(
                "Failed to remove '{}': {}",
                key, e
            ))),
        }
    }
}
