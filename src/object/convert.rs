use serde_json::Value;

use super::{ApiObject, Field};
use crate::client::ClientRef;

/// Turn a decoded JSON value into a [`Field`].
///
/// Objects become [`ApiObject`]s carrying `client`, arrays are converted element by
/// element, everything else maps onto the matching leaf. Recurses to any depth.
pub fn convert(value: Value, client: Option<&ClientRef>) -> Field {
    match value {
        Value::Object(map) => Field::Object(ApiObject::new(client.cloned(), Some(map))),
        Value::Array(items) => Field::Array(items.into_iter().map(|v| convert(v, client)).collect()),
        Value::String(s) => Field::String(s),
        Value::Number(n) => Field::Number(n),
        Value::Bool(b) => Field::Bool(b),
        Value::Null => Field::Null,
    }
}

pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}
