//! Wire payloads exchanged across the boundary.
//!
//! # Design
//! Each direction is one JSON object carried as a string. The response is a
//! tagged result whose discriminant is the boolean `ok` field; serde cannot
//! tag on a boolean, so `ResponsePayload` round-trips through a flat
//! `WireResponse` shape and is validated on the way in.
//!
//! `RequestPayload::parse` is the executor's lenient reader: header values
//! may still be numbers or lists, and the method may be missing or lower
//! case. Builders always emit the strict form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ValidationError, DEFAULT_FAILURE_MESSAGE};
use crate::headers::normalize_headers;
use crate::http::{normalize_method, ResponseType};

/// An outbound HTTP call, serialized by the caller for the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
}

/// Request as it may arrive from an arbitrary caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingRequest {
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    headers: Option<Map<String, Value>>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    response_type: Option<ResponseType>,
}

impl RequestPayload {
    /// Parse and normalize a serialized request.
    ///
    /// A missing method defaults to `GET`; a missing or empty `url` is an
    /// error.
    pub fn parse(payload: &str) -> Result<Self, ValidationError> {
        let incoming: IncomingRequest = serde_json::from_str(payload)
            .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;

        let url = match incoming.url {
            Some(url) if !url.trim().is_empty() => url,
            _ => return Err(ValidationError::MissingUrl),
        };
        let method = normalize_method(incoming.method.as_deref().unwrap_or("GET"))?;
        let headers = incoming
            .headers
            .as_ref()
            .map(normalize_headers)
            .unwrap_or_default();

        Ok(Self {
            method,
            url,
            headers,
            body: incoming.body,
            response_type: incoming.response_type,
        })
    }

    pub fn to_json(&self) -> Result<String, ValidationError> {
        serde_json::to_string(self).map_err(|e| ValidationError::Serialization(e.to_string()))
    }
}

/// A completed HTTP exchange, whatever its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessPayload {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    /// Final URL after redirects.
    pub url: String,
    /// UTF-8 text, or base64 text when `base64` is set.
    pub body: String,
    pub response_type: ResponseType,
    pub base64: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// An exchange that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct FailurePayload {
    pub error: ErrorBody,
}

impl FailurePayload {
    pub fn message(&self) -> &str {
        self.error.message.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE)
    }
}

/// The executor's answer: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireResponse", into = "WireResponse")]
pub enum ResponsePayload {
    Success(SuccessPayload),
    Failure(FailurePayload),
}

impl ResponsePayload {
    pub fn failure(message: impl Into<String>, details: Option<Value>) -> Self {
        ResponsePayload::Failure(FailurePayload {
            error: ErrorBody {
                message: Some(message.into()),
                details,
            },
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ResponsePayload::Success(_))
    }

    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_type: Option<ResponseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base64: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

impl TryFrom<WireResponse> for ResponsePayload {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        if !wire.ok {
            let error = wire.error.unwrap_or(ErrorBody {
                message: None,
                details: None,
            });
            return Ok(ResponsePayload::Failure(FailurePayload { error }));
        }
        let status = wire
            .status
            .ok_or_else(|| "success payload is missing status".to_string())?;
        Ok(ResponsePayload::Success(SuccessPayload {
            status,
            status_text: wire.status_text.unwrap_or_default(),
            headers: wire.headers.unwrap_or_default(),
            url: wire.url.unwrap_or_default(),
            body: wire.body.unwrap_or_default(),
            response_type: wire.response_type.unwrap_or_default(),
            base64: wire.base64.unwrap_or(false),
        }))
    }
}

impl From<ResponsePayload> for WireResponse {
    fn from(payload: ResponsePayload) -> Self {
        match payload {
            ResponsePayload::Success(s) => WireResponse {
                ok: true,
                status: Some(s.status),
                status_text: Some(s.status_text),
                headers: Some(s.headers),
                body: Some(s.body),
                response_type: Some(s.response_type),
                url: Some(s.url),
                base64: s.base64.then_some(true),
                error: None,
            },
            ResponsePayload::Failure(f) => WireResponse {
                ok: false,
                status: None,
                status_text: None,
                headers: None,
                body: None,
                response_type: None,
                url: None,
                base64: None,
                error: Some(f.error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_normalizes_method_and_headers() {
        let payload = RequestPayload::parse(
            r#"{"url":"https://example.com/api","method":"post","headers":{"X-Token":123},"body":"{\"foo\": \"bar\"}"}"#,
        )
        .unwrap();
        assert_eq!(payload.url, "https://example.com/api");
        assert_eq!(payload.method, "POST");
        assert_eq!(payload.headers["X-Token"], "123");
        assert_eq!(payload.body.as_deref(), Some(r#"{"foo": "bar"}"#));
        assert!(payload.response_type.is_none());
    }

    #[test]
    fn parse_requires_url() {
        assert_eq!(RequestPayload::parse("{}"), Err(ValidationError::MissingUrl));
        assert_eq!(
            RequestPayload::parse(r#"{"url":""}"#),
            Err(ValidationError::MissingUrl)
        );
    }

    #[test]
    fn parse_defaults_to_get() {
        let payload = RequestPayload::parse(r#"{"url":"https://example.com"}"#).unwrap();
        assert_eq!(payload.method, "GET");
    }

    #[test]
    fn parse_rejects_non_object() {
        assert!(matches!(
            RequestPayload::parse("not json"),
            Err(ValidationError::MalformedPayload(_))
        ));
    }

    #[test]
    fn request_omits_absent_fields() {
        let payload = RequestPayload {
            method: "GET".to_string(),
            url: "https://example.com".to_string(),
            headers: BTreeMap::new(),
            body: None,
            response_type: None,
        };
        let value: Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"method": "GET", "url": "https://example.com"}));
    }

    #[test]
    fn success_serializes_base64_only_when_set() {
        let mut success = SuccessPayload {
            status: 200,
            status_text: "OK".to_string(),
            headers: BTreeMap::new(),
            url: "https://example.com/".to_string(),
            body: "hello".to_string(),
            response_type: ResponseType::Text,
            base64: false,
        };
        let text: Value =
            serde_json::to_value(ResponsePayload::Success(success.clone())).unwrap();
        assert_eq!(text["ok"], true);
        assert_eq!(text["statusText"], "OK");
        assert_eq!(text["responseType"], "text");
        assert!(text.get("base64").is_none());
        assert!(text.get("error").is_none());

        success.base64 = true;
        success.response_type = ResponseType::ArrayBuffer;
        let binary: Value = serde_json::to_value(ResponsePayload::Success(success)).unwrap();
        assert_eq!(binary["base64"], true);
        assert_eq!(binary["responseType"], "arrayBuffer");
    }

    #[test]
    fn failure_serializes_without_success_fields() {
        let failure = ResponsePayload::failure("network failure", None);
        let value: Value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value, json!({"ok": false, "error": {"message": "network failure"}}));
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let payload = ResponsePayload::parse(r#"{"ok":false}"#).unwrap();
        match payload {
            ResponsePayload::Failure(f) => assert_eq!(f.message(), DEFAULT_FAILURE_MESSAGE),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn success_requires_status() {
        assert!(ResponsePayload::parse(r#"{"ok":true,"body":"x"}"#).is_err());
    }

    #[test]
    fn success_fills_defaults() {
        let payload = ResponsePayload::parse(r#"{"ok":true,"status":204}"#).unwrap();
        match payload {
            ResponsePayload::Success(s) => {
                assert_eq!(s.status, 204);
                assert!(s.body.is_empty());
                assert_eq!(s.response_type, ResponseType::Text);
                assert!(!s.base64);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }
}
