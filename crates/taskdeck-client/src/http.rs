//! `reqwest`-backed implementation of the transport seam.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use taskdeck_core::api::{ApiRequest, ApiResponse, ApiTransport, HttpMethod};
use taskdeck_core::error::{Result, TaskdeckError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sends each [`ApiRequest`] over HTTP against a fixed base URL.
///
/// Every failure mode where no server answer materialized (connection
/// refused, DNS, timeout, unreadable or unparsable body) is normalized to
/// the single synthetic network failure; the underlying cause only goes to
/// the log. Whatever the server did answer, including non-2xx, comes back as
/// an [`ApiResponse`] with the JSON body intact.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport for the given server base URL. Trailing slashes
    /// are stripped so paths can be appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        }
        .timeout(self.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!("{} {}", request.method.as_str(), url);

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed in transit: {}", request.method.as_str(), url, e);
            TaskdeckError::network()
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            tracing::warn!("failed to read response body for {}: {}", url, e);
            TaskdeckError::network()
        })?;

        let body = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("unparsable response body for {} (status {}): {}", url, status, e);
                    return Err(TaskdeckError::network());
                }
            }
        };

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let transport = HttpTransport::new("http://localhost:8000/");
        assert_eq!(transport.base_url, "http://localhost:8000");

        let transport = HttpTransport::new("http://localhost:8000");
        assert_eq!(transport.base_url, "http://localhost:8000");
    }
}
