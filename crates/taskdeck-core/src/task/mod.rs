//! Task domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Task` record as served by the backend, plus the
//!   `TaskPatch` partial-update body

mod model;

// Re-export public API
pub use model::{Task, TaskPatch};
