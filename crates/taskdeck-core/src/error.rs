//! Error types for the taskdeck client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Detail string used whenever no server response was available: the request
/// never reached a server, timed out, or the response body was not parsable.
/// Callers see one synthesized detail regardless of the underlying cause.
pub const NETWORK_ERROR_DETAIL: &str = "Network error. Please check your connection.";

/// A shared error type for all public client operations.
///
/// Every failure a caller can observe is one of these variants; the client
/// never raises uncaught faults. Callers branch on success vs. failure first,
/// and only inspect the error body when they need user-facing text.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TaskdeckError {
    /// The server answered with a non-2xx status. `body` carries the JSON
    /// error payload verbatim (`{detail}`, `{non_field_errors}`, or
    /// `{field: [messages]}`), never reinterpreted here.
    #[error("request rejected by server (status {status})")]
    Rejected { status: u16, body: Value },

    /// Transport failure, normalized to a single synthetic detail string.
    #[error("{0}")]
    Network(String),

    /// A toggle was requested for an id the local cache does not hold, so no
    /// server call could even be attempted.
    #[error("Task not found")]
    TaskNotFound { id: i64 },

    /// Durable client storage failure (file I/O and the like).
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TaskdeckError {
    /// Creates the normalized transport failure.
    pub fn network() -> Self {
        Self::Network(NETWORK_ERROR_DETAIL.to_string())
    }

    /// Creates a Rejected error carrying the server body verbatim.
    pub fn rejected(status: u16, body: Value) -> Self {
        Self::Rejected { status, body }
    }

    /// Creates a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Check if this is a server rejection
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Check if this is a transport failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Derives user-facing text from the failure.
    ///
    /// For server rejections the error body is checked in order: a bare
    /// string value, a `detail` field, the first entry of a
    /// `non_field_errors` list, else all `field: first-message` pairs joined
    /// with commas. Binding layers display this; the core itself never
    /// branches on it.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(detail) => detail.clone(),
            Self::TaskNotFound { .. } => "Task not found".to_string(),
            Self::Storage(message) => message.clone(),
            Self::Rejected { status, body } => {
                if let Value::String(text) = body {
                    return text.clone();
                }
                if let Some(detail) = body.get("detail").and_then(Value::as_str) {
                    return detail.to_string();
                }
                if let Some(first) = body
                    .get("non_field_errors")
                    .and_then(Value::as_array)
                    .and_then(|errors| errors.first())
                    .and_then(Value::as_str)
                {
                    return first.to_string();
                }
                if let Some(fields) = body.as_object() {
                    let parts: Vec<String> = fields
                        .iter()
                        .filter_map(|(field, messages)| {
                            let first = match messages {
                                Value::Array(items) => {
                                    items.first().and_then(Value::as_str).map(str::to_string)
                                }
                                Value::String(text) => Some(text.clone()),
                                _ => None,
                            };
                            first.map(|message| format!("{}: {}", field, message))
                        })
                        .collect();
                    if !parts.is_empty() {
                        return parts.join(", ");
                    }
                }
                format!("Request failed (status {})", status)
            }
        }
    }
}

impl From<std::io::Error> for TaskdeckError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// A type alias for `Result<T, TaskdeckError>`.
pub type Result<T> = std::result::Result<T, TaskdeckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_prefers_string_body() {
        let err = TaskdeckError::rejected(400, json!("plain error text"));
        assert_eq!(err.user_message(), "plain error text");
    }

    #[test]
    fn test_user_message_detail_field() {
        let err = TaskdeckError::rejected(401, json!({"detail": "Invalid credentials"}));
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_user_message_non_field_errors() {
        let err = TaskdeckError::rejected(
            400,
            json!({"non_field_errors": ["Passwords do not match", "second"]}),
        );
        assert_eq!(err.user_message(), "Passwords do not match");
    }

    #[test]
    fn test_user_message_joins_field_errors() {
        let err = TaskdeckError::rejected(
            400,
            json!({"title": ["This field is required."]}),
        );
        assert_eq!(err.user_message(), "title: This field is required.");
    }

    #[test]
    fn test_user_message_detail_wins_over_fields() {
        let err = TaskdeckError::rejected(
            400,
            json!({"detail": "picked", "title": ["ignored"]}),
        );
        assert_eq!(err.user_message(), "picked");
    }

    #[test]
    fn test_user_message_fallback_on_empty_body() {
        let err = TaskdeckError::rejected(500, Value::Null);
        assert_eq!(err.user_message(), "Request failed (status 500)");
    }

    #[test]
    fn test_network_error_detail() {
        let err = TaskdeckError::network();
        assert!(err.is_network());
        assert_eq!(err.user_message(), NETWORK_ERROR_DETAIL);
    }

    #[test]
    fn test_task_not_found_message() {
        let err = TaskdeckError::TaskNotFound { id: 42 };
        assert_eq!(err.user_message(), "Task not found");
        assert_eq!(err.to_string(), "Task not found");
    }
}
