//! The drop capability: objects whose properties are computed on demand.
//!
//! Property resolution dispatches on `Value::Drop` and asks the drop for
//! each property instead of reading a stored entry. A drop also decides what
//! an unknown property means through `method_missing`.

use std::fmt;

use crate::value::Value;

/// A lazily computed value with an open-ended property set.
pub trait DropObject: fmt::Debug {
    /// Compute `key`, or `None` when this drop has no handler for it.
    fn get(&self, key: &str) -> Option<Value>;

    /// Fallback for properties without a handler.
    fn method_missing(&self, _key: &str) -> Value {
        Value::Undefined
    }

    /// The plain value this drop stands for when used as a whole
    /// (as output, as a key, or as a collection).
    fn value_of(&self) -> Option<Value> {
        None
    }
}
