//! HTTP execution behind a trait seam.
//!
//! # Design
//! The core builds requests and parses responses as plain data; this module
//! is the host that actually performs the round-trip. `UreqTransport`
//! disables ureq's status-code-as-error behavior: a 4xx/5xx body still
//! carries an envelope, and interpreting it belongs to the core, not the
//! transport. Tests substitute a fake `Transport` to script responses.

use students_core::{HttpMethod, HttpRequest, HttpResponse};

/// Errors raised while executing a request: connection failures, timeouts,
/// or an unreadable response body. Envelope-level failures are not transport
/// errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
}

/// Executes an `HttpRequest` built by the core and returns the raw response.
pub trait Transport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a shared ureq agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = ?req.method, path = %req.path, "executing request");

        let result = match (&req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };

        let mut response = result.map_err(|e| {
            tracing::warn!(path = %req.path, error = %e, "transport failure");
            TransportError::Request(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
