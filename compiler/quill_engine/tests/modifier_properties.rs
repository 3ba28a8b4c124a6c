//! Property tests for `for` modifiers against a slice model.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]
#![allow(
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use quill_engine::tags::for_loop::{limit, offset};
use quill_engine::{Quill, QuillOptions};
use quill_ir::{Object, Value};
use proptest::prelude::*;

/// Start index of `n` into a sequence of `len`, negative from the end.
fn model_index(n: i64, len: usize) -> usize {
    let len = len as i64;
    (if n < 0 { len + n } else { n }).clamp(0, len) as usize
}

fn model(len: usize, offset: Option<i64>, limit: Option<i64>, reversed: bool) -> Vec<i64> {
    let mut items: Vec<i64> = (1..=len as i64).collect();
    if let Some(n) = offset {
        items.drain(..model_index(n, items.len()));
    }
    if let Some(n) = limit {
        items.truncate(model_index(n, items.len()));
    }
    if reversed {
        items.reverse();
    }
    items
}

fn header(offset: Option<i64>, limit: Option<i64>, reversed: bool) -> String {
    let mut modifiers = String::new();
    if reversed {
        modifiers.push_str(" reversed");
    }
    if let Some(n) = limit {
        modifiers.push_str(&format!(" limit: {n}"));
    }
    if let Some(n) = offset {
        modifiers.push_str(&format!(" offset: {n}"));
    }
    format!("{{% for x in xs{modifiers} %}}{{{{ x }}}},{{% endfor %}}")
}

proptest! {
    #[test]
    fn default_order_matches_model(
        len in 0usize..12,
        offset_by in proptest::option::of(-15i64..15),
        limit_to in proptest::option::of(-15i64..15),
        reversed in any::<bool>(),
    ) {
        let mut data = Object::new();
        data.insert("xs", Value::array((1..=len as i64).map(Value::Int).collect()));
        let out = Quill::new(QuillOptions::default())
            .parse_and_render_sync(&header(offset_by, limit_to, reversed), data)
            .unwrap();
        let expected: String = model(len, offset_by, limit_to, reversed)
            .iter()
            .map(|n| format!("{n},"))
            .collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn offset_then_limit_never_grows(
        len in 0usize..20,
        a in -25i64..25,
        b in -25i64..25,
    ) {
        let items: Vec<Value> = (0..len as i64).map(Value::Int).collect();
        let sliced = limit(offset(items, a), b);
        prop_assert!(sliced.len() <= len);
        let expected: Vec<Value> = model(len, Some(a), Some(b), false)
            .into_iter()
            .map(|n| Value::Int(n - 1))
            .collect();
        prop_assert_eq!(sliced, expected);
    }
}
