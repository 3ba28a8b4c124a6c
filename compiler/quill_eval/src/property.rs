//! Property reads: one step of a variable path.
//!
//! Order of precedence for `receiver[key]`:
//! 1. a nullish receiver yields itself
//! 2. a negative integer key on an array indexes from the end
//! 3. the plain read (own entries only in own-property mode, unless the
//!    receiver is a drop); a drop without a handler answers through
//!    `method_missing`
//! 4. a callable result is invoked with no arguments
//! 5. `size`, `first` and `last` fall back to synthetic readings when the
//!    plain read found nothing

use quill_ir::{Object, Value};

use crate::drive::{to_liquid, to_value};

/// Read `key` from `receiver`. A suspension point: both sides are resolved
/// first. The result itself may still be `Deferred`.
pub async fn read_property(receiver: Value, key: Value, own_property_only: bool) -> Value {
    let receiver = to_liquid(receiver).await;
    let key = to_value(key).await;
    read_resolved(&receiver, &key, own_property_only)
}

/// `read_property` on values that are already resolved.
pub fn read_resolved(receiver: &Value, key: &Value, own_property_only: bool) -> Value {
    if receiver.is_nullish() {
        return receiver.clone();
    }
    if let Value::Array(items) = receiver {
        if let Some(index) = key.as_index().filter(|i| *i < 0) {
            return from_end(items, index);
        }
    }

    let name = key.to_key_string();
    let value = match receiver {
        Value::Object(object) => read_entry(object, &name, own_property_only),
        Value::Drop(drop) => match drop.get(&name) {
            Some(value) if !value.is_undefined() => value,
            _ => drop.method_missing(&name),
        },
        Value::Array(items) => name
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get(i).cloned())
            .unwrap_or_default(),
        Value::Str(s) => name
            .parse::<usize>()
            .ok()
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::from(c.to_string()))
            .unwrap_or_default(),
        _ => Value::Undefined,
    };
    let value = call_if_callable(value);
    if !value.is_undefined() {
        return value;
    }

    match name.as_str() {
        "size" => read_size(receiver),
        "first" => read_first(receiver),
        "last" => read_last(receiver),
        _ => value,
    }
}

/// Read `key` from a plain object, honouring own-property mode.
///
/// Scopes are read through here too, so a missing `size` is the entry
/// count.
pub fn read_object(object: &Object, key: &str, own_property_only: bool) -> Value {
    let value = call_if_callable(read_entry(object, key, own_property_only));
    if value.is_undefined() && key == "size" {
        return Value::Int(object.len() as i64);
    }
    value
}

fn read_entry(object: &Object, key: &str, own_property_only: bool) -> Value {
    let found = if own_property_only {
        object.get_own(key)
    } else {
        object.get(key)
    };
    found.cloned().unwrap_or_default()
}

fn call_if_callable(value: Value) -> Value {
    match value {
        Value::Func(f) => f.call(),
        other => other,
    }
}

fn from_end(items: &[Value], index: i64) -> Value {
    let len = items.len() as i64;
    let at = len.saturating_add(index);
    usize::try_from(at)
        .ok()
        .and_then(|i| items.get(i).cloned())
        .unwrap_or_default()
}

fn read_size(receiver: &Value) -> Value {
    match receiver {
        Value::Array(items) => Value::Int(items.len() as i64),
        Value::Str(s) => Value::Int(s.chars().count() as i64),
        Value::Object(object) => read_object(object, "size", false),
        _ => Value::Undefined,
    }
}

fn read_first(receiver: &Value) -> Value {
    match receiver {
        Value::Array(items) => items.first().cloned().unwrap_or_default(),
        Value::Object(object) => read_object(object, "first", false),
        _ => Value::Undefined,
    }
}

fn read_last(receiver: &Value) -> Value {
    match receiver {
        Value::Array(items) => items.last().cloned().unwrap_or_default(),
        Value::Object(object) => read_object(object, "last", false),
        _ => Value::Undefined,
    }
}

#[cfg(test)]
mod tests;
