//! Coercion of resolved values to finite ordered sequences.

use quill_ir::Value;

/// The elements a loop visits for `value`.
///
/// Arrays yield their elements, objects their values in insertion order.
/// Everything else, strings and nullish values included, is empty. Drops
/// must be unwrapped with `to_value` first.
pub fn to_enumerable(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.as_ref().clone(),
        Value::Object(object) => object.values().cloned().collect(),
        _ => Vec::new(),
    }
}
