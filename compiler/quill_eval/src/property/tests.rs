use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use quill_ir::{Deferred, DropObject};

use super::*;
use crate::drive::drive_sync;

fn read(receiver: &Value, key: impl Into<Value>) -> Value {
    read_resolved(receiver, &key.into(), false)
}

fn numbers() -> Value {
    Value::array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
}

#[derive(Debug, Default)]
struct Counter {
    missing: Cell<u32>,
}

impl DropObject for Counter {
    fn get(&self, key: &str) -> Option<Value> {
        match key {
            "known" => Some(Value::Int(1)),
            "computed" => Some(Value::func(|| Value::string("called"))),
            _ => None,
        }
    }

    fn method_missing(&self, key: &str) -> Value {
        self.missing.set(self.missing.get() + 1);
        Value::from(format!("missing:{key}"))
    }
}

#[test]
fn nullish_receivers_propagate() {
    assert_eq!(read(&Value::Nil, "x"), Value::Nil);
    assert_eq!(read(&Value::Undefined, "size"), Value::Undefined);
}

#[test]
fn array_indexing() {
    assert_eq!(read(&numbers(), 0_i64), Value::Int(1));
    assert_eq!(read(&numbers(), "2"), Value::Int(3));
    assert_eq!(read(&numbers(), -1_i64), Value::Int(3));
    assert_eq!(read(&numbers(), -3_i64), Value::Int(1));
    assert_eq!(read(&numbers(), -4_i64), Value::Undefined);
    assert_eq!(read(&numbers(), 9_i64), Value::Undefined);
}

#[test]
fn synthetic_keys_on_arrays_and_strings() {
    assert_eq!(read(&numbers(), "size"), Value::Int(3));
    assert_eq!(read(&numbers(), "first"), Value::Int(1));
    assert_eq!(read(&numbers(), "last"), Value::Int(3));
    assert_eq!(read(&Value::string("héllo"), "size"), Value::Int(5));
    assert_eq!(read(&Value::string("abc"), 1_i64), Value::string("b"));
    assert_eq!(read(&Value::string("abc"), "first"), Value::Undefined);
}

#[test]
fn object_size_prefers_defined_entry() {
    let plain = Value::object(Object::from_iter([("a", Value::Int(1)), ("b", Value::Int(2))]));
    assert_eq!(read(&plain, "size"), Value::Int(2));

    let sized = Value::object(Object::from_iter([("size", Value::string("big"))]));
    assert_eq!(read(&sized, "size"), Value::string("big"));

    let first = Value::object(Object::from_iter([("first", Value::Int(7))]));
    assert_eq!(read(&first, "first"), Value::Int(7));
}

#[test]
fn callables_are_invoked() {
    let object = Value::object(Object::from_iter([("now", Value::func(|| Value::Int(5)))]));
    assert_eq!(read(&object, "now"), Value::Int(5));
}

#[test]
fn own_property_mode_hides_inherited_entries() {
    let proto = Rc::new(Object::from_iter([("inherited", Value::Int(1))]));
    let mut child = Object::with_proto(proto);
    child.insert("own", Value::Int(2));
    let child = Value::object(child);

    assert_eq!(read_resolved(&child, &"inherited".into(), false), Value::Int(1));
    assert_eq!(read_resolved(&child, &"inherited".into(), true), Value::Undefined);
    assert_eq!(read_resolved(&child, &"own".into(), true), Value::Int(2));
}

#[test]
fn drops_ignore_own_property_mode() {
    let drop = Value::drop_object(Counter::default());
    assert_eq!(read_resolved(&drop, &"known".into(), true), Value::Int(1));
    assert_eq!(
        read_resolved(&drop, &"computed".into(), true),
        Value::string("called")
    );
}

#[test]
fn drops_fall_back_to_method_missing() {
    let counter = Rc::new(Counter::default());
    let drop = Value::Drop(Rc::clone(&counter) as Rc<dyn DropObject>);
    assert_eq!(read(&drop, "nope"), Value::string("missing:nope"));
    assert_eq!(counter.missing.get(), 1);
}

#[test]
fn deferred_receiver_and_key_resolve_first() {
    let receiver = Value::Deferred(Deferred::ready(numbers()));
    let key = Value::Deferred(Deferred::ready(Value::Int(1)));
    let value = drive_sync(async { Ok(read_property(receiver, key, false).await) });
    assert_eq!(value, Ok(Value::Int(2)));
}

#[test]
fn scalars_have_no_properties() {
    assert_eq!(read(&Value::Int(3), "size"), Value::Undefined);
    assert_eq!(read(&Value::Bool(true), "x"), Value::Undefined);
}
