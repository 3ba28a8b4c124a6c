//! Deferred values: data that may still be in flight when a template reads it.
//!
//! A `Deferred` wraps a shared, single-threaded future. Cloning it shares the
//! same underlying computation, so every reader observes the one result.
//! Whether a pending `Deferred` is an error or simply awaited is decided by
//! the driver that runs the render, never by the code that reads it.

use std::fmt;
use std::future::Future;

use futures::future::{self, LocalBoxFuture, Shared};
use futures::FutureExt;

use super::Value;

/// A shared handle to a value that may not be available yet.
#[derive(Clone)]
pub struct Deferred(Shared<LocalBoxFuture<'static, Value>>);

impl Deferred {
    /// Defer on an arbitrary future.
    pub fn new<F>(computation: F) -> Self
    where
        F: Future<Output = Value> + 'static,
    {
        Deferred(computation.boxed_local().shared())
    }

    /// A deferred value that is already available.
    ///
    /// Completed eagerly, so `peek` sees it and synchronous drivers accept it.
    pub fn ready(value: Value) -> Self {
        let deferred = Self::new(future::ready(value));
        let _ = deferred.0.clone().now_or_never();
        deferred
    }

    /// The result, if the computation has already completed.
    pub fn peek(&self) -> Option<&Value> {
        self.0.peek()
    }

    /// Wait for the value.
    pub async fn resolve(self) -> Value {
        self.0.await
    }

    /// Whether two handles share one computation.
    pub fn ptr_eq(&self, other: &Deferred) -> bool {
        Shared::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(value) => f.debug_tuple("Deferred").field(value).finish(),
            None => f.write_str("Deferred(<pending>)"),
        }
    }
}
