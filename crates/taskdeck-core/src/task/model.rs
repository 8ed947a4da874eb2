//! Task domain model.
//!
//! A task is exclusively owned by the backend; the client holds a cached
//! replica keyed by the server-assigned id.

use serde::{Deserialize, Serialize};

/// A single to-do item as known to the client.
///
/// Mirrors the backend's task serializer: `id` is server-assigned and
/// immutable, `title` is required non-empty at creation (enforced by the
/// backend, not here), `description` defaults to empty. The timestamps are
/// pass-through values the client never interprets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier, unique within a user's task set.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: String,
    /// Completion state.
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp as serialized by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last-update timestamp as serialized by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial-update body for `PATCH /api/tasks/{id}/`.
///
/// Only fields that are present get serialized, so an untouched field is
/// never sent back to the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that only changes the completion state.
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }

    /// Sets the title to update.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description to update.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True if the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_deserializes_server_payload() {
        let task: Task = serde_json::from_value(json!({
            "id": 7,
            "title": "Write the report",
            "description": "Due Friday",
            "completed": false,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-02T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.title, "Write the report");
        assert!(!task.completed);
    }

    #[test]
    fn test_task_tolerates_missing_optional_fields() {
        let task: Task = serde_json::from_value(json!({"id": 1, "title": "t"})).unwrap();
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert!(task.created_at.is_none());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let body = serde_json::to_value(TaskPatch::completed(true)).unwrap();
        assert_eq!(body, json!({"completed": true}));

        let body =
            serde_json::to_value(TaskPatch::new().with_title("new title")).unwrap();
        assert_eq!(body, json!({"title": "new title"}));
    }

    #[test]
    fn test_empty_patch() {
        let patch = TaskPatch::new();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_value(patch).unwrap(), json!({}));
    }
}
