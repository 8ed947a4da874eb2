//! Core domain layer for taskdeck.
//!
//! Contains the domain models (tasks, users, sessions), the shared error
//! type, and the two trait seams the client components are built on:
//!
//! - [`storage::KeyValueStore`]: durable client storage (token/user
//!   persistence across restarts)
//! - [`api::ApiTransport`]: one REST request, one response, no retries
//!
//! This crate holds no I/O of its own; implementations live in
//! `taskdeck-infrastructure` (storage) and `taskdeck-client` (HTTP).

pub mod api;
pub mod error;
pub mod session;
pub mod storage;
pub mod task;
pub mod user;

// Re-export common error type
pub use error::{Result, TaskdeckError};
