use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as SerError, Serialize, Serializer};
use serde_json::{Number, Value};

use super::convert::convert;
use super::ApiObject;

/// A value held by an [`ApiObject`].
///
/// Maps and sequences coming out of a refresh are always converted, so a
/// decoded JSON object shows up here as [`Field::Object`], never as a raw map.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Field>),
    Object(ApiObject),
    /// NaN or an infinity written directly; it has no JSON form
    NonFinite(f64),
}

impl Field {
    pub fn type_name(&self) -> &'static str {
        match self {
            Field::Null => "null",
            Field::Bool(_) => "boolean",
            Field::Number(_) => "number",
            Field::String(_) => "string",
            Field::Array(_) => "array",
            Field::Object(_) => "object",
            Field::NonFinite(_) => "non-finite number",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Field::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Field::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Number(n) => n.as_f64(),
            Field::NonFinite(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Field>> {
        match self {
            Field::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Field>> {
        match self {
            Field::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ApiObject> {
        match self {
            Field::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ApiObject> {
        match self {
            Field::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Null => serializer.serialize_unit(),
            Field::Bool(b) => serializer.serialize_bool(*b),
            Field::Number(n) => n.serialize(serializer),
            Field::String(s) => serializer.serialize_str(s),
            Field::Array(items) => serializer.collect_seq(items),
            Field::Object(o) => o.serialize(serializer),
            Field::NonFinite(f) => Err(S::Error::custom(format!("{} cannot be represented as JSON", f))),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| convert(v, None))
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Field {
                fn from(value: $t) -> Self {
                    Field::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map(Field::Number).unwrap_or(Field::NonFinite(value))
    }
}

impl From<f32> for Field {
    fn from(value: f32) -> Self {
        Field::from(value as f64)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::String(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::String(value)
    }
}

impl From<ApiObject> for Field {
    fn from(value: ApiObject) -> Self {
        Field::Object(value)
    }
}

impl<T: Into<Field>> From<Vec<T>> for Field {
    fn from(value: Vec<T>) -> Self {
        Field::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Field::Null)
    }
}

/// structural: objects become client-less [`ApiObject`]s
impl From<Value> for Field {
    fn from(value: Value) -> Self {
        convert(value, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_float_without_json_form() {
        assert!(matches!(Field::from(1.5), Field::Number(_)));
        assert!(matches!(Field::from(f64::NAN), Field::NonFinite(_)));
        assert!(matches!(Field::from(f64::INFINITY), Field::NonFinite(_)));
        assert!(serde_json::to_string(&Field::from(f64::NEG_INFINITY)).is_err());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Field::from("abc").as_str(), Some("abc"));
        assert_eq!(Field::from(-3).as_i64(), Some(-3));
        assert_eq!(Field::from(7u64).as_u64(), Some(7));
        assert_eq!(Field::from(true).as_bool(), Some(true));
        assert!(Field::from(None::<i32>).is_null());
        assert_eq!(Field::from(vec![1, 2]).as_array().map(|a| a.len()), Some(2));
        assert!(Field::from("abc").as_object().is_none());
        assert_eq!(Field::from(json!({"a": 1})).type_name(), "object");
    }

    #[test]
    fn test_deserialize_converts_objects() {
        let field: Field = serde_json::from_str(r#"[{"a": {"b": 1}}, 2]"#).unwrap();
        let items = field.as_array().unwrap();
        let first = items[0].as_object().unwrap();
        assert!(first["a"].as_object().is_some());
        assert_eq!(items[1].as_i64(), Some(2));
    }
}
