//! Boundary Executor: serialized request in, serialized response out.
//!
//! # Design
//! `execute` is total. Malformed payloads, transport failures and body
//! read errors all come back as a failure payload because the boundary has
//! no way to carry an exception. There are no retries and no timeouts;
//! the network call runs to its natural end.
//!
//! The executor holds nothing but its transport, so concurrent calls share
//! no mutable state.

use std::collections::BTreeMap;

use serde_json::json;
use uuid::Uuid;

use bridge_core::encoding::encode_body;
use bridge_core::{Boundary, RequestPayload, ResponsePayload, ResponseType, SuccessPayload};

use crate::config::{ConfigError, HostConfig};
use crate::transport::{Transport, TransportResponse, UreqTransport};

/// Last-resort answer if a response payload cannot be serialized.
const SERIALIZATION_FAILURE: &str =
    r#"{"ok":false,"error":{"message":"failed to serialize HTTP response payload"}}"#;

#[derive(Debug, Clone)]
pub struct Executor<T = UreqTransport> {
    transport: T,
}

impl Executor<UreqTransport> {
    pub fn new(config: &HostConfig) -> Self {
        Self::with_transport(UreqTransport::new(config))
    }

    /// Build an executor from `BRIDGE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&HostConfig::from_env()?))
    }
}

impl Default for Executor<UreqTransport> {
    fn default() -> Self {
        Self::new(&HostConfig::default())
    }
}

impl<T: Transport> Executor<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle one serialized request payload.
    pub fn execute(&self, payload: &str) -> String {
        let call_id = Uuid::new_v4();
        let span = tracing::info_span!("bridge_call", %call_id);
        let _entered = span.enter();

        let response = match RequestPayload::parse(payload) {
            Ok(request) => self.execute_payload(&request),
            Err(e) => {
                tracing::warn!(error = %e, "rejected request payload");
                ResponsePayload::failure(e.to_string(), None)
            }
        };

        response.to_json().unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to serialize response payload");
            SERIALIZATION_FAILURE.to_string()
        })
    }

    /// Perform the HTTP call described by `request`.
    pub fn execute_payload(&self, request: &RequestPayload) -> ResponsePayload {
        tracing::debug!(method = %request.method, url = %request.url, "executing request");
        match self.transport.send(request) {
            Ok(response) => {
                let success = materialize(request.response_type, response);
                tracing::debug!(
                    status = success.status,
                    response_type = %success.response_type,
                    base64 = success.base64,
                    "request completed"
                );
                ResponsePayload::Success(success)
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %request.url, "request failed");
                ResponsePayload::failure(e.to_string(), Some(json!({ "kind": e.kind() })))
            }
        }
    }
}

impl<T: Transport> Boundary for Executor<T> {
    fn apply(&self, payload: &str) -> String {
        self.execute(payload)
    }
}

/// Turn a buffered response into a success payload.
///
/// With no explicit `requested` type the type is inferred from the
/// response's `content-type`. `arrayBuffer` bodies are base64-encoded; all
/// other bodies are decoded as UTF-8 text (lossily) and never pre-parsed.
pub fn materialize(requested: Option<ResponseType>, response: TransportResponse) -> SuccessPayload {
    let response_type =
        requested.unwrap_or_else(|| ResponseType::infer(response.header("content-type")));

    let (body, base64) = match response_type {
        ResponseType::ArrayBuffer => (encode_body(&response.body), true),
        ResponseType::Text | ResponseType::Json => {
            (String::from_utf8_lossy(&response.body).into_owned(), false)
        }
    };

    SuccessPayload {
        status: response.status,
        status_text: response.status_text,
        headers: merge_headers(response.headers),
        url: response.url,
        body,
        response_type,
        base64,
    }
}

/// Collapse repeated header names into one comma-joined value.
fn merge_headers(headers: Vec<(String, String)>) -> BTreeMap<String, String> {
    let mut merged: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        merged
            .entry(name)
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    merged
}
