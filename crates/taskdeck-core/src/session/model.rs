//! Session domain model.
//!
//! The authenticated identity for the running client: a JWT pair plus the
//! server-confirmed user record, exactly as issued by the login and
//! registration endpoints.

use crate::user::User;
use serde::{Deserialize, Serialize};

/// Token pair issued by the backend on login or registration.
///
/// Only `access` is used by the client for request headers; `refresh` is
/// persisted but otherwise untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Payload of a successful login or registration: `{user, tokens}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub tokens: AuthTokens,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_session_matches_wire_shape() {
        let session: AuthSession = serde_json::from_value(json!({
            "user": {"id": 1, "username": "u", "email": "u@example.com"},
            "tokens": {"access": "A", "refresh": "R"}
        }))
        .unwrap();
        assert_eq!(session.user.username, "u");
        assert_eq!(session.tokens.access, "A");
        assert_eq!(session.tokens.refresh, "R");
    }
}
