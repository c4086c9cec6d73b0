//! C-ABI wrapper around `bridge-host`.
//!
//! # Overview
//! Exposes the boundary call itself through `extern "C"` functions so a
//! sandboxed runtime in any language can hand a serialized request payload
//! to the host and get a serialized response payload back, without linking
//! to Rust's HTTP stack or serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `bridge_execute` always returns a response payload. Null arguments,
//!   non-UTF-8 input and caught panics are reported as `ok: false`
//!   payloads, never as a null pointer.
//! - The C caller owns all returned pointers and must call the matching
//!   `bridge_*_free` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use bridge_host::Executor;

use types::*;

// ---------------------------------------------------------------------------
// Executor lifecycle
// ---------------------------------------------------------------------------

/// Create an executor configured from `BRIDGE_*` environment variables.
///
/// Returns null if the configuration is invalid or an internal panic occurs.
/// The caller must free the returned pointer with `bridge_executor_free`.
#[unsafe(no_mangle)]
pub extern "C" fn bridge_executor_new() -> *mut FfiExecutor {
    catch_unwind(AssertUnwindSafe(|| match Executor::from_env() {
        Ok(inner) => Box::into_raw(Box::new(FfiExecutor { inner })),
        Err(e) => {
            tracing::warn!(error = %e, "invalid bridge configuration");
            std::ptr::null_mut()
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Free an executor created by `bridge_executor_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn bridge_executor_free(executor: *mut FfiExecutor) {
    if !executor.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(executor) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Boundary call
// ---------------------------------------------------------------------------

/// Execute one serialized request payload and return the serialized
/// response payload.
///
/// Blocks until the HTTP exchange completes or fails. Never returns null.
/// The caller must free the returned string with `bridge_string_free`.
#[unsafe(no_mangle)]
pub extern "C" fn bridge_execute(
    executor: *const FfiExecutor,
    payload: *const c_char,
) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if executor.is_null() {
            return failure("null argument: executor");
        }
        if payload.is_null() {
            return failure("null argument: payload");
        }
        let executor = unsafe { &*executor };
        let payload = match unsafe { CStr::from_ptr(payload) }.to_str() {
            Ok(p) => p,
            Err(e) => return failure(&format!("request payload is not valid UTF-8: {e}")),
        };
        into_c_string(executor.inner.execute(payload))
    }))
    .unwrap_or_else(|_| failure("panic in bridge_execute"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn bridge_string_free(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { CString::from_raw(s) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
