//! Durable client storage trait.
//!
//! Defines the minimal key-value capability the session layer persists
//! through, decoupling it from the concrete storage mechanism (files,
//! in-memory maps, platform stores).

use crate::error::Result;
use async_trait::async_trait;

/// Storage keys used by the session layer. These three keys are the entire
/// persisted-state surface; nothing else is read or written.
pub mod keys {
    /// Bearer credential for API calls.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Refresh credential, persisted but unused by the core logic.
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// JSON-encoded user record.
    pub const USER: &str = "user";
}

/// An abstract key-value store for small durable client state.
///
/// Writes are independent and idempotent; implementations need no
/// transactional grouping.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: key present
    /// - `Ok(None)`: key absent (a normal state, not an error)
    /// - `Err(_)`: the store itself failed
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<()>;
}
