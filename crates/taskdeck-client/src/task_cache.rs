//! TaskCache: ordered local replica of the server-held task list.
//!
//! The backend owns the tasks; this cache mirrors them and splices its copy
//! only from server responses — never speculatively. Each operation performs
//! exactly one network round trip. On any failure the replica is left
//! untouched.
//!
//! Ordering policy: a full fetch adopts the server's order wholesale; a
//! create prepends at index 0 (newest first, regardless of timestamps); an
//! update replaces in place at the task's existing index.

use serde_json::Value;
use std::sync::Arc;
use taskdeck_core::api::{self, ApiRequest, ApiTransport};
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::task::{Task, TaskPatch};

use crate::session_store::SessionStore;

/// Local replica of the current user's tasks.
///
/// Consults the injected [`SessionStore`] for auth headers before every
/// request but never mutates it. All replica mutation happens synchronously
/// inside the response handler, so `&mut self` is the whole concurrency
/// story.
pub struct TaskCache {
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
    tasks: Vec<Task>,
}

impl TaskCache {
    /// Creates an empty cache bound to a session.
    pub fn new(transport: Arc<dyn ApiTransport>, session: Arc<SessionStore>) -> Self {
        Self {
            transport,
            session,
            tasks: Vec::new(),
        }
    }

    /// The current replica, in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Drops the whole replica. Called on logout; tasks belong to a user.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Fetches the full task list and replaces the replica wholesale with
    /// the server's order. On failure the replica is untouched.
    pub async fn fetch_all(&mut self) -> Result<Vec<Task>> {
        let request = ApiRequest::get(api::TASKS_PATH).with_headers(self.session.auth_headers());
        let response = self.transport.send(request).await?;
        let body = response
            .into_result()?
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let tasks: Vec<Task> = serde_json::from_value(body).map_err(|e| {
            tracing::warn!("malformed task list payload: {}", e);
            TaskdeckError::network()
        })?;
        self.tasks = tasks.clone();
        Ok(tasks)
    }

    /// Creates a task and prepends the server-returned record (with its
    /// assigned id) at index 0.
    pub async fn create(&mut self, title: &str, description: &str) -> Result<Task> {
        let request = ApiRequest::post(
            api::TASKS_PATH,
            serde_json::json!({"title": title, "description": description}),
        )
        .with_headers(self.session.auth_headers());
        let response = self.transport.send(request).await?;
        let task = parse_task(response.into_result()?)?;
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Sends a partial update and replaces the local task in place (same
    /// index) with the server's full returned record.
    ///
    /// If the id is absent locally the update still succeeds — the server
    /// accepted it — and no local splice occurs. Deliberate tolerance of a
    /// soft inconsistency, not an error.
    pub async fn update(&mut self, id: i64, patch: TaskPatch) -> Result<Task> {
        let body = serde_json::to_value(patch).unwrap_or_default();
        let request =
            ApiRequest::patch(api::task_path(id), body).with_headers(self.session.auth_headers());
        let response = self.transport.send(request).await?;
        let task = parse_task(response.into_result()?)?;
        if let Some(index) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks[index] = task.clone();
        }
        Ok(task)
    }

    /// Deletes a task and removes it from the replica. Filter semantics: an
    /// id absent locally is a no-op removal, still a success.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        let request =
            ApiRequest::delete(api::task_path(id)).with_headers(self.session.auth_headers());
        let response = self.transport.send(request).await?;
        response.into_result()?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    /// Flips a task's completion state based on the client's last-known
    /// value, then delegates to [`update`](Self::update).
    ///
    /// The lookup is local only: an unknown id fails immediately with
    /// [`TaskdeckError::TaskNotFound`] and no request is issued. Toggling
    /// from local state can race a concurrent server-side change; that is an
    /// accepted limitation.
    pub async fn toggle_completed(&mut self, id: i64) -> Result<Task> {
        let completed = match self.tasks.iter().find(|t| t.id == id) {
            Some(task) => task.completed,
            None => return Err(TaskdeckError::TaskNotFound { id }),
        };
        self.update(id, TaskPatch::completed(!completed)).await
    }
}

fn parse_task(body: Option<Value>) -> Result<Task> {
    let Some(body) = body else {
        tracing::warn!("expected a task payload, got an empty body");
        return Err(TaskdeckError::network());
    };
    serde_json::from_value(body).map_err(|e| {
        tracing::warn!("malformed task payload: {}", e);
        TaskdeckError::network()
    })
}
