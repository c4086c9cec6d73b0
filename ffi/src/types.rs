//! Types and helpers for the FFI boundary.
//!
//! # Design
//! The boundary is a single string channel, so the only C-visible type is
//! an opaque executor handle. Everything else crosses as NUL-terminated
//! UTF-8 JSON. Conversion helpers live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use bridge_core::ResponsePayload;
use bridge_host::Executor;

/// Opaque handle to an `Executor`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiExecutor {
    pub(crate) inner: Executor,
}

/// Hand a Rust string to C. The caller frees it with `bridge_string_free`.
///
/// A string with an interior NUL cannot cross as a C string, so it is
/// replaced by a failure payload.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => c.into_raw(),
        Err(_) => failure("response payload contains an interior NUL byte"),
    }
}

/// Serialize a failure payload for C.
///
/// serde_json escapes control characters, so the JSON itself never holds a
/// raw NUL.
pub(crate) fn failure(message: &str) -> *mut c_char {
    ResponsePayload::failure(message, None)
        .to_json()
        .ok()
        .and_then(|json| CString::new(json).ok())
        .unwrap_or_else(|| FALLBACK_FAILURE.to_owned())
        .into_raw()
}

const FALLBACK_FAILURE: &std::ffi::CStr = c"{\"ok\":false,\"error\":{\"message\":\"HTTP request failed\"}}";
