//! Runtime values flowing through template evaluation.
//!
//! `Value` is cheap to clone: every heap-backed variant is reference counted.
//! Values are single-threaded (`Rc`), matching the cooperative render model
//! where no two threads ever touch one render tree.

mod deferred;

use std::fmt;
use std::rc::Rc;

pub use deferred::Deferred;

use crate::drop_object::DropObject;
use crate::object::Object;

/// A zero-argument computed property.
///
/// Property reads invoke it and use the return value in its place.
#[derive(Clone)]
pub struct Callable(Rc<dyn Fn() -> Value>);

impl Callable {
    /// Wrap a closure as a computed property.
    pub fn new(f: impl Fn() -> Value + 'static) -> Self {
        Callable(Rc::new(f))
    }

    /// Invoke the computed property.
    #[inline]
    pub fn call(&self) -> Value {
        (self.0)()
    }

    /// Whether two callables are the same allocation.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable")
    }
}

/// A template runtime value.
///
/// `Undefined` and `Nil` are distinct: `Undefined` means "absent" (what a
/// missing property read yields and what strict mode rejects), `Nil` is an
/// explicit null supplied by data or a literal. Both are nullish.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Array(Rc<Vec<Value>>),
    Object(Rc<Object>),
    /// Lazily computed object resolved through the `DropObject` capability.
    Drop(Rc<dyn DropObject>),
    /// Zero-argument computed property.
    Func(Callable),
    /// A value that may not be available yet.
    Deferred(Deferred),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }

    /// Create an object value.
    #[inline]
    pub fn object(object: Object) -> Self {
        Value::Object(Rc::new(object))
    }

    /// Create a drop value.
    #[inline]
    pub fn drop_object(drop: impl DropObject + 'static) -> Self {
        Value::Drop(Rc::new(drop))
    }

    /// Create a zero-argument computed property.
    #[inline]
    pub fn func(f: impl Fn() -> Value + 'static) -> Self {
        Value::Func(Callable::new(f))
    }

    /// `true` for `Undefined` only.
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// `true` for `Undefined` and `Nil`.
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Nil)
    }

    /// Template truthiness: only `false` and nullish values are falsy.
    ///
    /// Zero and the empty string are truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Undefined | Value::Nil | Value::Bool(false))
    }

    /// Borrow the string contents if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view used for indices: exact integers only.
    #[allow(clippy::float_cmp, reason = "exact integral check")]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.trunc() == *f && f.is_finite() => Some(*f as i64),
            Value::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Numeric coercion used by tag arguments such as `offset` and `limit`.
    ///
    /// Floats truncate, numeric strings parse, `Nil` counts as zero.
    /// Anything else has no integer reading.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Value::Str(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
            }
            Value::Nil => Some(0),
            _ => None,
        }
    }

    /// Numeric view for comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Render a property key as a string.
    ///
    /// Keys are compared textually against object entries, so `1` and `"1"`
    /// address the same entry.
    pub fn to_key_string(&self) -> String {
        self.to_string()
    }

    /// Short type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Drop(_) => "drop",
            Value::Func(_) => "function",
            Value::Deferred(_) => "deferred",
        }
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "template equality is exact")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Drop(a), Value::Drop(b)) => Rc::ptr_eq(a, b),
            (Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
            (Value::Deferred(a), Value::Deferred(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Nil => f.write_str("Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Object(object) => fmt::Debug::fmt(object, f),
            Value::Drop(drop) => write!(f, "Drop({drop:?})"),
            Value::Func(_) => f.write_str("Func"),
            Value::Deferred(d) => fmt::Debug::fmt(d, f),
        }
    }
}

/// Output stringification.
///
/// Nullish values print nothing, arrays concatenate their elements, drops
/// print their `value_of` reading. Deferred and callable values must be
/// resolved before output and print nothing here.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined | Value::Nil | Value::Func(_) | Value::Deferred(_) => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => items.iter().try_for_each(|item| write!(f, "{item}")),
            Value::Object(object) => write!(f, "{object}"),
            Value::Drop(drop) => match drop.value_of() {
                Some(value) => write!(f, "{value}"),
                None => Ok(()),
            },
        }
    }
}

/// Integral floats print without a fractional part (`3.0` prints `3`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        write!(f, "{}", x as i64)
    } else {
        write!(f, "{x}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::object(object)
    }
}

impl From<Deferred> for Value {
    fn from(deferred: Deferred) -> Self {
        Value::Deferred(deferred)
    }
}

#[cfg(test)]
mod tests;
