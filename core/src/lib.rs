//! Caller-side core of the HTTP bridge protocol.
//!
//! # Overview
//! A sandboxed caller cannot open sockets. Instead it serializes every
//! outbound HTTP call into a single JSON request payload, hands that string
//! to a trusted host through one opaque [`Boundary`] call, and gets a single
//! JSON response payload back. This crate owns both payload shapes and the
//! two caller-side halves of the exchange:
//!
//! - the Request Builder ([`request`]) turns method, URL, query, headers and
//!   body into a validated [`RequestPayload`];
//! - the Response Adapter ([`response`]) turns a response payload into a
//!   typed [`Response`] or a [`BridgeError`].
//!
//! # Design
//! - No network I/O happens here. The host executor lives in `bridge-host`
//!   and plugs in through [`Boundary`], so every test can substitute a stub.
//! - Success and failure are an explicit `ok`-tagged result on the wire
//!   because the boundary cannot carry exceptions. The adapter re-expands a
//!   failure into [`BridgeError`]; a body that fails to parse as JSON is a
//!   separate [`DecodeError`].
//! - Binary bodies travel as base64 text and the `base64` flag is the only
//!   signal the adapter trusts for decoding.

pub mod boundary;
pub mod client;
pub mod encoding;
pub mod error;
pub mod headers;
pub mod http;
pub mod request;
pub mod response;
pub mod types;

pub use boundary::{boundary_fn, Boundary, BoundaryFn};
pub use client::{HttpClient, RequestBuilder};
pub use error::{BridgeError, DecodeError, HttpError, ValidationError};
pub use headers::{normalize_headers, HeaderValue};
pub use http::{HttpMethod, ResponseType};
pub use request::{build_payload, build_request, RequestOptions};
pub use response::{adapt_response, Response};
pub use types::{ErrorBody, FailurePayload, RequestPayload, ResponsePayload, SuccessPayload};
