//! Error types for the bridge protocol.
//!
//! # Design
//! Three failure domains are kept apart so callers can tell them apart:
//!
//! - `ValidationError` is raised by the builder before any boundary call.
//! - `BridgeError` is the caller-side form of a wire-level failure payload.
//!   Transport failures and every other executor-side failure collapse into
//!   it; callers never need to distinguish them.
//! - `DecodeError` means the exchange succeeded but the body was not the
//!   JSON the caller asked for.

use serde_json::Value;

/// Fallback message used when a failure payload carries no message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "HTTP request failed";

/// Malformed request input, detected before anything crosses the boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("HTTP request requires a method")]
    MissingMethod,

    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    #[error("HTTP request payload must include url")]
    MissingUrl,

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// `body` and `json` were both supplied.
    #[error("request body and json body are mutually exclusive")]
    ConflictingBody,

    #[error("failed to serialize request: {0}")]
    Serialization(String),

    /// The executor received a payload that is not a JSON object.
    #[error("malformed HTTP request payload: {0}")]
    MalformedPayload(String),
}

/// A failed bridge call as seen by the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct BridgeError {
    message: String,
    details: Option<Value>,
}

impl BridgeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            message: message.into(),
            details,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured detail forwarded from the executor, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

/// The response body could not be decoded into the requested shape.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything `HttpClient::send` can fail with.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_error_displays_message_only() {
        let err = BridgeError::with_details("boom", Some(serde_json::json!({"kind": "network"})));
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.details().unwrap()["kind"], "network");
    }

    #[test]
    fn missing_url_message_matches_executor_wording() {
        assert_eq!(
            ValidationError::MissingUrl.to_string(),
            "HTTP request payload must include url"
        );
    }

    #[test]
    fn http_error_is_transparent() {
        let err: HttpError = BridgeError::new("down").into();
        assert_eq!(err.to_string(), "down");
        assert!(matches!(err, HttpError::Bridge(_)));
    }
}
