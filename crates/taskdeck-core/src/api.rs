//! REST surface shared between the client components and transports.
//!
//! The request/response value types deliberately stay close to the wire: a
//! method, a path relative to the server base URL, header pairs, and an
//! optional JSON body. Error bodies travel through untouched so callers see
//! exactly what the server said.

use crate::error::{Result, TaskdeckError};
use async_trait::async_trait;
use serde_json::Value;

/// Registration endpoint.
pub const REGISTER_PATH: &str = "/api/auth/register/";
/// Login endpoint.
pub const LOGIN_PATH: &str = "/api/auth/login/";
/// Task collection endpoint (list and create).
pub const TASKS_PATH: &str = "/api/tasks/";

/// Path of a single task resource, e.g. `/api/tasks/7/`.
pub fn task_path(id: i64) -> String {
    format!("{}{}/", TASKS_PATH, id)
}

/// HTTP methods the client uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// One outgoing request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the server base URL, e.g. `/api/tasks/`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::bare(HttpMethod::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::bare(HttpMethod::Post, path, Some(body))
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::bare(HttpMethod::Patch, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::bare(HttpMethod::Delete, path, None)
    }

    /// Attaches header pairs, replacing any previously set.
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    fn bare(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body,
        }
    }
}

/// One incoming response: the status and the parsed JSON body, if any.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Splits the response into a success body or the verbatim server
    /// rejection. A missing body on a non-2xx response becomes `Null`.
    pub fn into_result(self) -> Result<Option<Value>> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(TaskdeckError::rejected(
                self.status,
                self.body.unwrap_or(Value::Null),
            ))
        }
    }
}

/// One REST round trip: send a request, suspend until its single response
/// arrives or the transport fails.
///
/// No queueing, no retries, no cancellation. `Err` is exclusively the
/// normalized transport failure ([`TaskdeckError::Network`]); every answer a
/// server actually produced comes back as an [`ApiResponse`], including
/// rejections.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
