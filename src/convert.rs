//! JSON -> context value conversion

use crate::Value;

/// Convert a decoded JSON document into a context value.
///
/// Every JSON number becomes an `f64`.
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
        }
    }
}

/// Decode a JSON string straight into a context value.
pub fn parse_context(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str::<serde_json::Value>(json).map(json_to_value)
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        json_to_value(v)
    }
}
