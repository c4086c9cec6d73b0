//! Response Adapter: turns a response payload into a typed `Response`.
//!
//! # Design
//! Pure deserialization. A failure payload becomes a `BridgeError`
//! immediately. A success payload becomes a `Response` whose body is
//! already base64-decoded when the executor flagged it; JSON parsing of the
//! body is deferred to `Response::json` so a non-JSON body never fails
//! construction.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::encoding::decode_body;
use crate::error::{BridgeError, DecodeError};
use crate::headers::find_header;
use crate::http::ResponseType;
use crate::types::{ResponsePayload, SuccessPayload};

/// A completed HTTP exchange as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    status_text: String,
    headers: BTreeMap<String, String>,
    url: String,
    response_type: ResponseType,
    body: Vec<u8>,
}

impl Response {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Final URL after redirects.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    /// Raw body bytes; decoded from base64 when the payload was binary.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

impl TryFrom<SuccessPayload> for Response {
    type Error = BridgeError;

    fn try_from(payload: SuccessPayload) -> Result<Self, Self::Error> {
        let body = if payload.base64 {
            decode_body(&payload.body)
                .map_err(|e| BridgeError::new(format!("invalid base64 response body: {e}")))?
        } else {
            payload.body.into_bytes()
        };
        Ok(Response {
            status: payload.status,
            status_text: payload.status_text,
            headers: payload.headers,
            url: payload.url,
            response_type: payload.response_type,
            body,
        })
    }
}

/// Deserialize a response payload, surfacing a failure as `BridgeError`.
pub fn adapt_response(payload: &str) -> Result<Response, BridgeError> {
    let parsed = ResponsePayload::parse(payload)
        .map_err(|e| BridgeError::new(format!("malformed HTTP response payload: {e}")))?;
    match parsed {
        ResponsePayload::Success(success) => Response::try_from(success),
        ResponsePayload::Failure(failure) => {
            let message = failure.message().to_string();
            let err = BridgeError::with_details(message, failure.error.details);
            tracing::debug!(error = %err, "bridge call failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DEFAULT_FAILURE_MESSAGE;
    use serde_json::{json, Value};

    fn success(status: u16, body: &str) -> String {
        json!({
            "ok": true,
            "status": status,
            "statusText": "",
            "headers": {"Content-Type": "text/plain"},
            "body": body,
            "responseType": "text",
            "url": "https://example.com/data",
        })
        .to_string()
    }

    #[test]
    fn text_success() {
        let response = adapt_response(&success(200, "hello")).unwrap();
        assert!(response.is_success());
        assert_eq!(response.text(), "hello");
        assert_eq!(response.url(), "https://example.com/data");
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.response_type(), ResponseType::Text);
    }

    #[test]
    fn success_range_is_inclusive() {
        assert!(adapt_response(&success(200, "")).unwrap().is_success());
        assert!(adapt_response(&success(299, "")).unwrap().is_success());
        assert!(!adapt_response(&success(199, "")).unwrap().is_success());
        assert!(!adapt_response(&success(300, "")).unwrap().is_success());
        assert!(!adapt_response(&success(404, "")).unwrap().is_success());
        assert!(!adapt_response(&success(500, "")).unwrap().is_success());
    }

    #[test]
    fn binary_body_is_decoded() {
        let raw = json!({
            "ok": true,
            "status": 200,
            "statusText": "OK",
            "headers": {},
            "body": "YmluYXJ5LWRhdGE=",
            "responseType": "arrayBuffer",
            "url": "https://example.com/file",
            "base64": true,
        })
        .to_string();
        let response = adapt_response(&raw).unwrap();
        assert_eq!(response.body(), b"binary-data");
    }

    #[test]
    fn base64_flag_is_the_only_decoding_signal() {
        let raw = json!({
            "ok": true,
            "status": 200,
            "headers": {"content-type": "image/png"},
            "body": "aGk=",
            "responseType": "arrayBuffer",
        })
        .to_string();
        assert_eq!(adapt_response(&raw).unwrap().body(), b"aGk=");
    }

    #[test]
    fn invalid_base64_is_a_bridge_error() {
        let raw = r#"{"ok":true,"status":200,"body":"%%%","base64":true}"#;
        let err = adapt_response(raw).unwrap_err();
        assert!(err.message().contains("base64"));
    }

    #[test]
    fn failure_becomes_bridge_error() {
        let err = adapt_response(r#"{"ok":false,"error":{"message":"boom"}}"#).unwrap_err();
        assert_eq!(err.message(), "boom");
        assert!(err.details().is_none());
    }

    #[test]
    fn failure_details_are_kept() {
        let raw = r#"{"ok":false,"error":{"message":"boom","details":{"kind":"network"}}}"#;
        let err = adapt_response(raw).unwrap_err();
        assert_eq!(err.details(), Some(&json!({"kind": "network"})));
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let err = adapt_response(r#"{"ok":false,"error":{}}"#).unwrap_err();
        assert_eq!(err.message(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn garbage_payload_is_a_bridge_error() {
        let err = adapt_response("<html>").unwrap_err();
        assert!(err.message().starts_with("malformed HTTP response payload"));
    }

    #[test]
    fn json_is_parsed_on_demand() {
        let response = adapt_response(&success(201, r#"{"result":"ok"}"#)).unwrap();
        let value: Value = response.json().unwrap();
        assert_eq!(value, json!({"result": "ok"}));
    }

    #[test]
    fn non_json_body_only_fails_when_asked() {
        let response = adapt_response(&success(200, "not json")).unwrap();
        assert!(matches!(response.json::<Value>(), Err(DecodeError::Json(_))));
    }
}
