//! The single capability that crosses the sandbox boundary.
//!
//! A boundary is a synchronous `string -> string` call. It has no error
//! channel of its own; failures are encoded in the returned payload.

use std::rc::Rc;
use std::sync::Arc;

pub trait Boundary {
    /// Hand a serialized request payload to the host and return its
    /// serialized response payload.
    fn apply(&self, payload: &str) -> String;
}

/// A boundary backed by a plain function or closure. Build one with
/// [`boundary_fn`].
#[derive(Clone, Copy)]
pub struct BoundaryFn<F>(F);

/// Wrap a `Fn(&str) -> String` so it can be handed to an `HttpClient`.
pub fn boundary_fn<F>(f: F) -> BoundaryFn<F>
where
    F: Fn(&str) -> String,
{
    BoundaryFn(f)
}

impl<F> Boundary for BoundaryFn<F>
where
    F: Fn(&str) -> String,
{
    fn apply(&self, payload: &str) -> String {
        (self.0)(payload)
    }
}

impl<B: Boundary + ?Sized> Boundary for &B {
    fn apply(&self, payload: &str) -> String {
        (**self).apply(payload)
    }
}

impl<B: Boundary + ?Sized> Boundary for Box<B> {
    fn apply(&self, payload: &str) -> String {
        (**self).apply(payload)
    }
}

impl<B: Boundary + ?Sized> Boundary for Rc<B> {
    fn apply(&self, payload: &str) -> String {
        (**self).apply(payload)
    }
}

impl<B: Boundary + ?Sized> Boundary for Arc<B> {
    fn apply(&self, payload: &str) -> String {
        (**self).apply(payload)
    }
}
