//! Convenience client over a `Boundary`.
//!
//! # Design
//! `HttpClient` holds only the boundary and carries no mutable state
//! between calls. A `RequestBuilder` accumulates `RequestOptions`; `send`
//! builds the payload, performs exactly one boundary call and adapts the
//! answer. A request that fails validation never reaches the boundary.

use serde::Serialize;

use crate::boundary::Boundary;
use crate::error::{HttpError, ValidationError};
use crate::headers::HeaderValue;
use crate::http::{HttpMethod, ResponseType};
use crate::request::{build_payload, RequestOptions};
use crate::response::{adapt_response, Response};
use crate::types::RequestPayload;

/// Stateless HTTP client that reaches the network through a boundary.
#[derive(Debug, Clone)]
pub struct HttpClient<B> {
    boundary: B,
}

impl<B: Boundary> HttpClient<B> {
    pub fn new(boundary: B) -> Self {
        Self { boundary }
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    /// Start a request with an arbitrary method token.
    pub fn request(&self, method: impl Into<String>, url: impl Into<String>) -> RequestBuilder<'_, B> {
        RequestBuilder {
            client: self,
            method: method.into(),
            url: url.into(),
            options: RequestOptions::default(),
            error: None,
        }
    }

    pub fn get(&self, url: impl Into<String>) -> RequestBuilder<'_, B> {
        self.request(HttpMethod::Get.as_str(), url)
    }

    pub fn head(&self, url: impl Into<String>) -> RequestBuilder<'_, B> {
        self.request(HttpMethod::Head.as_str(), url)
    }

    pub fn post(&self, url: impl Into<String>) -> RequestBuilder<'_, B> {
        self.request(HttpMethod::Post.as_str(), url)
    }

    pub fn put(&self, url: impl Into<String>) -> RequestBuilder<'_, B> {
        self.request(HttpMethod::Put.as_str(), url)
    }

    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder<'_, B> {
        self.request(HttpMethod::Patch.as_str(), url)
    }

    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder<'_, B> {
        self.request(HttpMethod::Delete.as_str(), url)
    }

    pub fn options(&self, url: impl Into<String>) -> RequestBuilder<'_, B> {
        self.request(HttpMethod::Options.as_str(), url)
    }

    /// Send an already-built payload.
    pub fn send_payload(&self, payload: &RequestPayload) -> Result<Response, HttpError> {
        let serialized = payload.to_json()?;
        let answer = self.boundary.apply(&serialized);
        Ok(adapt_response(&answer)?)
    }
}

/// Accumulates the optional parts of one request.
#[derive(Debug)]
pub struct RequestBuilder<'a, B> {
    client: &'a HttpClient<B>,
    method: String,
    url: String,
    options: RequestOptions,
    error: Option<ValidationError>,
}

impl<B: Boundary> RequestBuilder<'_, B> {
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.options.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.options.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<HeaderValue>,
    {
        self.options
            .headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.options.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => self.options.json = Some(json),
            Err(e) => self.error = Some(ValidationError::Serialization(e.to_string())),
        }
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.options.response_type = Some(response_type);
        self
    }

    pub fn payload(&self) -> Result<RequestPayload, ValidationError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        build_payload(&self.method, &self.url, &self.options)
    }

    /// The serialized request payload, without sending it.
    pub fn build(&self) -> Result<String, ValidationError> {
        self.payload()?.to_json()
    }

    pub fn send(self) -> Result<Response, HttpError> {
        let payload = self.payload()?;
        self.client.send_payload(&payload)
    }
}
