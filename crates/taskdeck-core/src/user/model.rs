//! User domain model.

use serde::{Deserialize, Serialize};

/// The last-known server-confirmed user record.
///
/// Returned by the auth endpoints inside the `{user, tokens}` payload and
/// persisted alongside the access token. Extra backend fields are tolerated
/// and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}
