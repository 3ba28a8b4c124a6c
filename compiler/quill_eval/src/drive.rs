//! Suspension drivers and value normalization.
//!
//! Every operation that might wait on data is an ordinary future: property
//! reads, expression evaluation and template rendering all `.await` the
//! values they touch. The only suspension points are `Deferred` values. How
//! a render is driven is decided once, at the top:
//!
//! - [`drive_sync`] polls the render exactly once. Everything it reads must
//!   already be available; a pending `Deferred` makes the poll return
//!   `Pending`, which is reported as [`EvalError::SyncMisuse`].
//! - [`drive_async`] simply awaits, so pending values are waited for.
//!
//! The interpreter body is the same in both modes, suspension point for
//! suspension point.

use std::future::Future;

use futures::FutureExt;
use quill_ir::Value;

use crate::errors::{sync_misuse, EvalError, EvalResult};

/// Resolve `Deferred` wrappers. A suspension point.
pub async fn to_liquid(value: Value) -> Value {
    let mut value = value;
    while let Value::Deferred(deferred) = value {
        value = deferred.resolve().await;
    }
    value
}

/// Resolve to a plain value: `Deferred` wrappers are awaited and drops are
/// replaced by their `value_of` reading when they have one.
pub async fn to_value(value: Value) -> Value {
    let mut value = to_liquid(value).await;
    while let Value::Drop(drop) = &value {
        match drop.value_of() {
            Some(inner) => value = to_liquid(inner).await,
            None => break,
        }
    }
    value
}

/// `to_value` for synchronous call sites: fails instead of waiting.
pub fn to_value_sync(value: Value) -> EvalResult {
    drive_sync(async { Ok(to_value(value).await) })
}

/// Run `computation` to completion without waiting on anything.
pub fn drive_sync<T>(computation: impl Future<Output = EvalResult<T>>) -> EvalResult<T> {
    match computation.now_or_never() {
        Some(result) => result,
        None => {
            tracing::debug!("pending value met by the synchronous driver");
            Err(sync_misuse())
        }
    }
}

/// Run `computation`, waiting on every pending value it meets.
pub async fn drive_async<T>(computation: impl Future<Output = EvalResult<T>>) -> EvalResult<T> {
    computation.await
}

/// Whether `err` came from driving a pending value synchronously.
pub fn is_sync_misuse(err: &EvalError) -> bool {
    matches!(err, EvalError::SyncMisuse)
}

#[cfg(test)]
mod tests;
