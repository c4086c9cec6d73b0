//! The real network call behind the executor.
//!
//! # Design
//! `Transport` is the seam between protocol handling and I/O so the
//! executor can be tested with a stub. `UreqTransport` is the production
//! implementation: one blocking `ureq` agent, shared immutably by every
//! call. Connection reuse inside the agent is invisible to callers.

use ureq::http::{Method, Request};
use ureq::{Agent, ResponseExt};

use bridge_core::RequestPayload;

use crate::config::HostConfig;

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    /// Final URL after redirects.
    pub url: String,
    /// Header names in the order received; duplicates are kept.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Case-insensitive lookup of the first header with this name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Errors raised while performing the network call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The payload could not be turned into an HTTP request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// DNS, connect, TLS, protocol or redirect failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl TransportError {
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::InvalidRequest(_) => "invalid_request",
            TransportError::Network(_) => "network",
            TransportError::Body(_) => "body",
        }
    }
}

/// Performs one HTTP exchange to completion or failure.
pub trait Transport: Send + Sync {
    fn send(&self, request: &RequestPayload) -> Result<TransportResponse, TransportError>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    max_body_bytes: u64,
}

impl UreqTransport {
    pub fn new(config: &HostConfig) -> Self {
        // 4xx/5xx are data for the caller, not transport errors. Extension
        // methods pass builder validation, so the agent must send them too.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .max_redirects(config.max_redirects)
            .build()
            .new_agent();
        Self {
            agent,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&HostConfig::default())
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &RequestPayload) -> Result<TransportResponse, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(format!("method {}: {e}", request.method)))?;

        let mut builder = Request::builder().method(method).uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let result = match &request.body {
            Some(body) => {
                let req = builder
                    .body(body.as_bytes())
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                self.agent.run(req)
            }
            None => {
                let req = builder
                    .body(())
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                self.agent.run(req)
            }
        };
        let mut response = result.map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let url = response.get_uri().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body_bytes)
            .read_to_vec()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            url,
            headers,
            body,
        })
    }
}
