//! Client components for the task-list backend.
//!
//! Two cooperating pieces, composed by a thin binding layer:
//!
//! - [`SessionStore`]: owns the authentication token and current-user record,
//!   persists them across restarts, derives headers for authenticated calls.
//! - [`TaskCache`]: ordered local replica of the current user's tasks,
//!   mutated in lockstep with server responses, one round trip per operation.
//!
//! The cache consults the session store for headers before every request but
//! never mutates it. [`HttpTransport`] is the production `reqwest`-backed
//! implementation of the transport seam.

mod http;
mod session_store;
mod task_cache;

pub use http::HttpTransport;
pub use session_store::SessionStore;
pub use task_cache::TaskCache;
