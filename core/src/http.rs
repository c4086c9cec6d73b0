//! HTTP vocabulary shared by both sides of the bridge.
//!
//! # Design
//! Methods travel as upper-case tokens rather than a closed enum so that
//! extension methods still reach the executor. `HttpMethod` covers the
//! common verbs for the convenience API; `normalize_method` is the single
//! place where method text is validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Standard HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_method(s)?.as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(ValidationError::InvalidMethod(s.to_string())),
        }
    }
}

/// Trim and upper-case a method, rejecting empty input and non-token
/// characters (RFC 7230 `tchar`).
pub fn normalize_method(method: &str) -> Result<String, ValidationError> {
    let trimmed = method.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingMethod);
    }
    if !trimmed.bytes().all(is_token_char) {
        return Err(ValidationError::InvalidMethod(method.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Decoding mode applied to a response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    #[default]
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "arrayBuffer")]
    ArrayBuffer,
}

/// Media type prefixes whose bodies are shipped as base64.
const BINARY_PREFIXES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "font/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
    "application/wasm",
];

impl ResponseType {
    /// Pick a response type from a `content-type` header value.
    ///
    /// Total: a missing or unrecognised media type yields `Text`.
    pub fn infer(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return ResponseType::Text;
        };
        let media_type = content_type.trim().to_ascii_lowercase();
        if media_type.contains("json") {
            ResponseType::Json
        } else if BINARY_PREFIXES.iter().any(|p| media_type.starts_with(p)) {
            ResponseType::ArrayBuffer
        } else {
            ResponseType::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Text => "text",
            ResponseType::Json => "json",
            ResponseType::ArrayBuffer => "arrayBuffer",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
