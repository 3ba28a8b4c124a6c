use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

use super::*;

#[test]
fn get_initializes_once_and_shares_the_cell() {
    let registers = Registers::new();
    assert!(!registers.contains("for"));
    registers
        .get::<FxHashMap<String, i64>>("for")
        .borrow_mut()
        .insert("k".to_owned(), 3);
    assert!(registers.contains("for"));
    let again = registers.get::<FxHashMap<String, i64>>("for");
    assert_eq!(again.borrow().get("k"), Some(&3));
}

#[test]
fn set_replaces() {
    let registers = Registers::new();
    *registers.get::<i64>("n").borrow_mut() = 1;
    registers.set("n", 7_i64);
    assert_eq!(*registers.get::<i64>("n").borrow(), 7);
}

#[test]
fn type_mismatch_reinitializes() {
    let registers = Registers::new();
    registers.set("slot", String::from("text"));
    assert_eq!(*registers.get::<i64>("slot").borrow(), 0);
}

#[test]
fn save_and_restore_in_order() {
    let registers = Registers::new();
    registers.set("a", 1_i64);
    let snapshot = registers.save(&["a", "b"]);
    assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["a", "b"]);

    registers.set("a", 2_i64);
    registers.set("b", 3_i64);
    registers.restore(snapshot);

    assert_eq!(*registers.get::<i64>("a").borrow(), 1);
    assert!(!registers.contains("b"));
}

#[test]
fn clones_alias_one_bag() {
    let registers = Registers::new();
    let alias = registers.clone();
    alias.set("x", 5_i64);
    assert!(registers.ptr_eq(&alias));
    assert_eq!(*registers.get::<i64>("x").borrow(), 5);
    assert!(!registers.ptr_eq(&Registers::new()));
}
