//! Infrastructure layer: durable storage implementations.
//!
//! Provides the [`taskdeck_core::storage::KeyValueStore`] implementations the
//! client components persist through:
//!
//! - [`FileKeyValueStore`]: one file per key under a base directory
//! - [`MemoryKeyValueStore`]: `HashMap`-backed, for tests and ephemeral use

mod file_store;
mod memory_store;
mod paths;

pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
pub use paths::default_data_dir;
