//! Host side of the HTTP bridge.
//!
//! # Overview
//! Runs outside the sandbox with full network access. The [`Executor`]
//! receives one serialized request payload, performs the real HTTP call
//! through a [`Transport`], and answers with one serialized response
//! payload. It implements [`bridge_core::Boundary`], so a caller-side
//! `HttpClient` can be wired straight to it in-process.
//!
//! # Design
//! - `execute` never fails and never panics on bad input; every problem is
//!   reported as an `ok: false` payload.
//! - Content-type inference and base64 encoding happen here exactly once;
//!   the caller trusts the `base64` flag.
//! - `UreqTransport` is blocking. Callers that run inside an async runtime
//!   should invoke the executor from a blocking task.

pub mod config;
pub mod executor;
pub mod transport;

pub use config::{ConfigError, HostConfig};
pub use executor::{materialize, Executor};
pub use transport::{Transport, TransportError, TransportResponse, UreqTransport};
