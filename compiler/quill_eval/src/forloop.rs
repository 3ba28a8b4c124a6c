//! `forloop`: iteration metadata exposed inside a loop body.

use std::cell::Cell;

use quill_ir::{DropObject, Value};

/// Position of one running loop. Properties are computed from the current
/// index on every read.
#[derive(Debug)]
pub struct ForloopDrop {
    index: Cell<usize>,
    length: usize,
    name: String,
}

impl ForloopDrop {
    /// `name` is `"{variable}-{collection}"`, telling nested loops apart.
    pub fn new(length: usize, collection: &str, variable: &str) -> Self {
        ForloopDrop {
            index: Cell::new(0),
            length,
            name: format!("{variable}-{collection}"),
        }
    }

    /// Advance to the next element.
    pub fn next(&self) {
        self.index.set(self.index.get() + 1);
    }

    #[inline]
    pub fn index0(&self) -> usize {
        self.index.get()
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl DropObject for ForloopDrop {
    fn get(&self, key: &str) -> Option<Value> {
        let i = self.index.get();
        let len = self.length;
        let value = match key {
            "length" => Value::Int(len as i64),
            "name" => Value::string(&self.name),
            "index" => Value::Int(i as i64 + 1),
            "index0" => Value::Int(i as i64),
            "rindex" => Value::Int(len as i64 - i as i64),
            "rindex0" => Value::Int(len as i64 - i as i64 - 1),
            "first" => Value::Bool(i == 0),
            "last" => Value::Bool(i + 1 == len),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn read(drop: &ForloopDrop, key: &str) -> Value {
        drop.get(key).unwrap_or_default()
    }

    #[test]
    fn properties_track_position() {
        let forloop = ForloopDrop::new(3, "items", "item");
        assert_eq!(read(&forloop, "index"), Value::Int(1));
        assert_eq!(read(&forloop, "rindex"), Value::Int(3));
        assert_eq!(read(&forloop, "first"), Value::Bool(true));
        assert_eq!(read(&forloop, "last"), Value::Bool(false));

        forloop.next();
        forloop.next();
        assert_eq!(read(&forloop, "index0"), Value::Int(2));
        assert_eq!(read(&forloop, "rindex0"), Value::Int(0));
        assert_eq!(read(&forloop, "first"), Value::Bool(false));
        assert_eq!(read(&forloop, "last"), Value::Bool(true));
        assert_eq!(read(&forloop, "length"), Value::Int(3));
    }

    #[test]
    fn name_combines_variable_and_collection() {
        let forloop = ForloopDrop::new(0, "(1..3)", "i");
        assert_eq!(forloop.name(), "i-(1..3)");
        assert_eq!(read(&forloop, "name"), Value::string("i-(1..3)"));
    }

    #[test]
    fn unknown_keys_have_no_handler() {
        assert_eq!(ForloopDrop::new(1, "a", "b").get("parentloop"), None);
    }
}
