//! Request Builder: turns a high-level call into a serialized payload.
//!
//! # Design
//! All validation happens here, before the boundary is touched: a request
//! that fails to build never costs a round trip. The URL must be absolute.
//! Without query pairs it is forwarded byte for byte; with query pairs it
//! is re-serialized by the `url` crate with the new pairs appended after
//! any existing ones.

use serde_json::Value;
use url::Url;

use crate::error::ValidationError;
use crate::headers::{find_header, normalize_header_list, HeaderValue};
use crate::http::{normalize_method, ResponseType};
use crate::types::RequestPayload;

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";

/// Optional parts of a request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, HeaderValue)>,
    pub body: Option<String>,
    /// Serialized into the body; forces `content-type: application/json`
    /// unless the caller set a content type.
    pub json: Option<Value>,
    pub response_type: Option<ResponseType>,
}

/// Validate and assemble a request payload.
pub fn build_payload(
    method: &str,
    url: &str,
    options: &RequestOptions,
) -> Result<RequestPayload, ValidationError> {
    let method = normalize_method(method)?;
    let url = resolve_url(url, &options.query)?;
    let mut headers = normalize_header_list(&options.headers);

    let body = match (&options.body, &options.json) {
        (Some(_), Some(_)) => return Err(ValidationError::ConflictingBody),
        (Some(body), None) => Some(body.clone()),
        (None, Some(json)) => {
            let rendered = serde_json::to_string(json)
                .map_err(|e| ValidationError::Serialization(e.to_string()))?;
            if find_header(&headers, CONTENT_TYPE).is_none() {
                headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
            }
            Some(rendered)
        }
        (None, None) => None,
    };

    tracing::debug!(%method, %url, headers = headers.len(), "built bridge request");

    Ok(RequestPayload {
        method,
        url,
        headers,
        body,
        response_type: options.response_type,
    })
}

/// Validate, assemble and serialize a request payload.
pub fn build_request(
    method: &str,
    url: &str,
    options: &RequestOptions,
) -> Result<String, ValidationError> {
    build_payload(method, url, options)?.to_json()
}

fn resolve_url(url: &str, query: &[(String, String)]) -> Result<String, ValidationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    let mut parsed = Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if query.is_empty() {
        return Ok(trimmed.to_string());
    }
    parsed
        .query_pairs_mut()
        .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    Ok(parsed.into())
}
