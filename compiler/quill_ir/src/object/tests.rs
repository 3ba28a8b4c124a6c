use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn insertion_order_is_preserved() {
    let mut object = Object::new();
    object.insert("b", Value::Int(2));
    object.insert("a", Value::Int(1));
    object.insert("c", Value::Int(3));
    assert_eq!(object.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
}

#[test]
fn inherited_entries_are_visible_but_not_own() {
    let proto: Object = [("x", Value::Int(1))].into_iter().collect();
    let mut child = Object::with_proto(Rc::new(proto));
    child.insert("y", Value::Int(2));

    assert_eq!(child.get("x"), Some(&Value::Int(1)));
    assert_eq!(child.get_own("x"), None);
    assert!(child.contains("x"));
    assert!(!child.has_own("x"));
    assert_eq!(child.len(), 1);
}

#[test]
fn own_entry_shadows_prototype() {
    let proto: Object = [("x", Value::Int(1))].into_iter().collect();
    let mut child = Object::with_proto(Rc::new(proto));
    child.insert("x", Value::Int(9));
    assert_eq!(child.get("x"), Some(&Value::Int(9)));
}

#[test]
fn assign_overwrites_conflicts() {
    let mut target: Object = [("a", Value::Int(1)), ("b", Value::Int(2))]
        .into_iter()
        .collect();
    let source: Object = [("b", Value::Int(20)), ("c", Value::Int(30))]
        .into_iter()
        .collect();
    target.assign(&source);
    assert_eq!(target.get("b"), Some(&Value::Int(20)));
    assert_eq!(target.get("c"), Some(&Value::Int(30)));
    assert_eq!(target.len(), 3);
}

#[test]
fn display_is_json_like() {
    let object: Object = [("name", Value::string("ann")), ("age", Value::Int(3))]
        .into_iter()
        .collect();
    assert_eq!(object.to_string(), r#"{"name":"ann","age":3}"#);
}
