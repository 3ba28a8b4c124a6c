#![expect(clippy::unwrap_used, reason = "test code")]

use futures::channel::oneshot;
use pretty_assertions::assert_eq;
use quill_ir::{Deferred, DropObject};

use super::*;

fn pending(rx: oneshot::Receiver<Value>) -> Value {
    Value::Deferred(Deferred::new(async move { rx.await.unwrap_or(Value::Nil) }))
}

#[derive(Debug)]
struct Wrapped(Value);

impl DropObject for Wrapped {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }
    fn value_of(&self) -> Option<Value> {
        Some(self.0.clone())
    }
}

#[test]
fn sync_driver_accepts_ready_values() {
    let value = Value::Deferred(Deferred::ready(Value::Int(1)));
    assert_eq!(to_value_sync(value).unwrap(), Value::Int(1));
}

#[test]
fn sync_driver_rejects_pending_values() {
    let (_tx, rx) = oneshot::channel();
    let err = to_value_sync(pending(rx)).unwrap_err();
    assert!(is_sync_misuse(&err));
}

#[test]
fn nested_deferred_and_drop_unwrap() {
    let inner = Value::Deferred(Deferred::ready(Value::string("x")));
    let value = Value::drop_object(Wrapped(inner));
    assert_eq!(to_value_sync(value).unwrap(), Value::string("x"));
}

#[test]
fn to_liquid_keeps_drops() {
    let value = Value::drop_object(Wrapped(Value::Int(1)));
    let out = drive_sync(async { Ok(to_liquid(value.clone()).await) }).unwrap();
    assert_eq!(out, value);
}

#[tokio::test]
async fn async_driver_waits_for_pending_values() {
    let (tx, rx) = oneshot::channel();
    let value = pending(rx);
    let sender = async move {
        tokio::task::yield_now().await;
        tx.send(Value::Int(9)).unwrap();
    };
    let (resolved, ()) = futures::join!(drive_async(async { Ok(to_value(value).await) }), sender);
    assert_eq!(resolved.unwrap(), Value::Int(9));
}
