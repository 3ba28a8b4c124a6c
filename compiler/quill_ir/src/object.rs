//! Insertion-ordered mappings: data objects and lexical scopes.
//!
//! An `Object` may carry a prototype. Entries reachable only through the
//! prototype are *inherited*: visible to plain reads, hidden from reads made
//! in own-property-only mode.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::Value;

/// One lexical binding level. Scopes are plain objects without a prototype.
pub type Scope = Object;

/// An ordered string-keyed mapping with an optional prototype.
#[derive(Clone, Default, PartialEq)]
pub struct Object {
    entries: IndexMap<String, Value>,
    proto: Option<Rc<Object>>,
}

impl Object {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object inheriting from `proto`.
    pub fn with_proto(proto: Rc<Object>) -> Self {
        Object {
            entries: IndexMap::new(),
            proto: Some(proto),
        }
    }

    /// Insert or replace an own entry, returning the previous own value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Remove an own entry.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Look up an own entry.
    #[inline]
    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable access to an own entry.
    pub fn get_own_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Look up an entry, walking the prototype chain.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(value) => Some(value),
            None => self.proto.as_deref().and_then(|proto| proto.get(key)),
        }
    }

    /// Whether `key` is an own entry.
    #[inline]
    pub fn has_own(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `key` is reachable, own or inherited.
    pub fn contains(&self, key: &str) -> bool {
        self.has_own(key) || self.proto.as_deref().is_some_and(|proto| proto.contains(key))
    }

    /// Number of own entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no own entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The prototype, if any.
    pub fn proto(&self) -> Option<&Rc<Object>> {
        self.proto.as_ref()
    }

    /// Own keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Own values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Own entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every own entry of `other` into `self`, overwriting on conflict.
    pub fn assign(&mut self, other: &Object) {
        for (key, value) in other.iter() {
            self.entries.insert(key.to_owned(), value.clone());
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Object {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            proto: None,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

/// JSON-like rendering of own entries, used when an object reaches output.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key:?}:")?;
            match value {
                Value::Str(s) => write!(f, "{s:?}")?,
                Value::Undefined | Value::Nil => f.write_str("null")?,
                other => write!(f, "{other}")?,
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests;
