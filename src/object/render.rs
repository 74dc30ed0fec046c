//! Text forms of an [`ApiObject`].
//!
//! `to_json` is the fallible rendering: keys sorted at every level, indented by
//! `render.indent` spaces. `Display` swaps a failure for [`INVALID_JSON`] and
//! `Debug` prefixes the kind and id.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{ApiObject, Field};
use crate::conf;
use crate::erx::ResultE;
use crate::tools::json::Enc;

/// shown instead of the JSON text when the object cannot be rendered
pub static INVALID_JSON: &'static str = "(invalid JSON)";

/// shown in the debug form when there is no `id` field
pub static NO_ID: &'static str = "No ID";

/// serializes objects with their keys in sorted order
struct Sorted<'a, T>(&'a T);

impl Serialize for Sorted<'_, ApiObject> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&String, &Field)> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (k, v) in entries {
            map.serialize_entry(k, &Sorted(v))?;
        }
        map.end()
    }
}

impl Serialize for Sorted<'_, Field> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Field::Object(o) => Sorted(o).serialize(serializer),
            Field::Array(items) => serializer.collect_seq(items.iter().map(Sorted)),
            other => other.serialize(serializer),
        }
    }
}

impl ApiObject {
    /// Render as key-sorted, indented JSON.
    pub fn to_json(&self) -> ResultE<String> {
        self.to_json_indent(conf::render_indent())
    }

    pub fn to_json_indent(&self, indent: usize) -> ResultE<String> {
        Enc::pretty_indent(&Sorted(self), indent)
    }
}

/// plain text of a field: strings unquoted, everything else as compact JSON
fn plain(field: &Field) -> String {
    match field {
        Field::String(s) => s.clone(),
        Field::NonFinite(f) => f.to_string(),
        other => Enc::en(other).unwrap_or_else(|_| INVALID_JSON.to_string()),
    }
}

impl fmt::Display for ApiObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(json) => f.write_str(&json),
            Err(e) => {
                tracing::warn!(kind = self.kind().name(), "object rendering failed: {}", e.message());
                f.write_str(INVALID_JSON)
            },
        }
    }
}

impl fmt::Debug for ApiObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.get("id").map(plain).unwrap_or_else(|| NO_ID.to_string());
        write!(f, "<{} id={}> Serialized: {}", self.kind().name(), id, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> ApiObject {
        ApiObject::from_value(None, value).unwrap()
    }

    #[test]
    fn test_sorted_indented() {
        let o = object(json!({"id": "123", "amount": 5}));
        assert_eq!(o.to_json().unwrap(), "{\n  \"amount\": 5,\n  \"id\": \"123\"\n}");
        assert_eq!(o.to_string(), o.to_json().unwrap());
    }

    #[test]
    fn test_nested_keys_sorted() {
        let o = object(json!({"b": {"z": 1, "a": [{"y": 1, "x": 2}]}, "a": null}));
        let expected = "{\n  \"a\": null,\n  \"b\": {\n    \"a\": [\n      {\n        \"x\": 2,\n        \"y\": 1\n      }\n    ],\n    \"z\": 1\n  }\n}";
        assert_eq!(o.to_json().unwrap(), expected);
    }

    #[test]
    fn test_custom_indent() {
        let o = object(json!({"a": 1}));
        assert_eq!(o.to_json_indent(4).unwrap(), "{\n    \"a\": 1\n}");
        assert_eq!(ApiObject::default().to_json().unwrap(), "{}");
    }

    #[test]
    fn test_placeholder_on_failure() {
        let mut o = object(json!({"id": "123"}));
        o.set("ratio", f64::NAN);
        let err = o.to_json().unwrap_err();
        assert!(err.is_serialization());
        assert_eq!(o.to_string(), INVALID_JSON);
    }

    #[test]
    fn test_placeholder_for_nested_failure() {
        let mut o = object(json!({"inner": {"a": 1}}));
        o.get_mut("inner").and_then(Field::as_object_mut).unwrap().set("bad", f64::INFINITY);
        assert_eq!(o.to_string(), INVALID_JSON);
    }

    #[test]
    fn test_debug_form() {
        let o = object(json!({"id": "123", "amount": 5}));
        let debug = format!("{:?}", o);
        assert!(debug.starts_with("<ApiObject id=123> Serialized: {"));
        assert!(debug.contains("\"id\": \"123\""));

        let numeric = object(json!({"id": 42}));
        assert!(format!("{:?}", numeric).contains("id=42"));

        let anonymous = object(json!({"amount": 5}));
        assert!(format!("{:?}", anonymous).starts_with("<ApiObject id=No ID>"));
    }
}
