//! Conversion from caller-supplied JSON data.

use serde_json::{Map, Value as Json};

use crate::object::Object;
use crate::value::Value;

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::from(s),
            Json::Array(items) => Value::array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::object(Object::from(map)),
        }
    }
}

impl From<Map<String, Json>> for Object {
    fn from(map: Map<String, Json>) -> Self {
        map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_json_converts() {
        let value = Value::from(json!({"a": [1, 2.5, "x", null, true]}));
        let Value::Object(object) = value else {
            panic!("expected object");
        };
        let Some(Value::Array(items)) = object.get_own("a") else {
            panic!("expected array");
        };
        assert_eq!(
            items.as_slice(),
            &[
                Value::Int(1),
                Value::Float(2.5),
                Value::string("x"),
                Value::Nil,
                Value::Bool(true)
            ]
        );
    }
}
