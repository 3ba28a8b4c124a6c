use pretty_assertions::assert_eq;

use super::*;

#[test]
fn only_false_and_nullish_are_falsy() {
    assert!(!Value::Undefined.is_truthy());
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Int(0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(Value::array(vec![]).is_truthy());
}

#[test]
fn integer_coercion() {
    assert_eq!(Value::Int(4).to_integer(), Some(4));
    assert_eq!(Value::Float(2.9).to_integer(), Some(2));
    assert_eq!(Value::Float(-2.9).to_integer(), Some(-2));
    assert_eq!(Value::string(" 7 ").to_integer(), Some(7));
    assert_eq!(Value::string("3.5").to_integer(), Some(3));
    assert_eq!(Value::Nil.to_integer(), Some(0));
    assert_eq!(Value::string("abc").to_integer(), None);
    assert_eq!(Value::Undefined.to_integer(), None);
    assert_eq!(Value::Bool(true).to_integer(), None);
}

#[test]
fn index_view_requires_exact_integers() {
    assert_eq!(Value::Float(2.0).as_index(), Some(2));
    assert_eq!(Value::Float(2.5).as_index(), None);
    assert_eq!(Value::string("-1").as_index(), Some(-1));
}

#[test]
fn display_for_output() {
    assert_eq!(Value::Undefined.to_string(), "");
    assert_eq!(Value::Nil.to_string(), "");
    assert_eq!(Value::Float(3.0).to_string(), "3");
    assert_eq!(Value::Float(1.5).to_string(), "1.5");
    assert_eq!(
        Value::array(vec![Value::Int(1), Value::string("a"), Value::Nil]).to_string(),
        "1a"
    );
    assert_eq!(Value::func(|| Value::Int(1)).to_string(), "");
}

#[test]
fn numbers_compare_across_representations() {
    assert_eq!(Value::Int(2), Value::Float(2.0));
    assert_ne!(Value::Int(2), Value::string("2"));
    assert_ne!(Value::Undefined, Value::Nil);
}

#[test]
fn reference_variants_compare_by_identity() {
    let f = Value::func(|| Value::Nil);
    assert_eq!(f.clone(), f);
    assert_ne!(f, Value::func(|| Value::Nil));
}

#[test]
fn drop_display_uses_value_of() {
    #[derive(Debug)]
    struct Answer;
    impl DropObject for Answer {
        fn get(&self, _key: &str) -> Option<Value> {
            None
        }
        fn value_of(&self) -> Option<Value> {
            Some(Value::Int(42))
        }
    }
    assert_eq!(Value::drop_object(Answer).to_string(), "42");
}

#[test]
fn ready_deferred_peeks() {
    let deferred = Deferred::ready(Value::Int(1));
    assert_eq!(deferred.peek(), Some(&Value::Int(1)));
}
