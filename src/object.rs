//! `ApiObject`: a decoded API response usable both as a map and through
//! attribute-style accessors.
//!
//! * mapping: `get` / `set` / `remove` / `item`, plus `obj["key"]`
//! * attributes: `attr` / `set_attr` / `del_attr`; names starting with `_` live in
//!   a private slot that is never serialized
//! * `refresh` replaces the whole content from a snapshot and keeps track of the
//!   keys that disappeared

pub mod convert;
pub mod field;
pub mod kind;
pub mod render;

pub use convert::convert;
pub use field::Field;
pub use kind::Kind;

use std::ops::{Index, IndexMut};
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::client::ClientRef;
use crate::erx::{Erx, ResultE};
use crate::tools::json::Dec;

/// attribute names starting with this address the private slot
pub static PRIVATE_MARKER: char = '_';

#[derive(Clone, Default)]
pub struct ApiObject {
    kind: Kind,
    client: Option<ClientRef>,
    data: IndexMap<String, Field>,
    removed: IndexSet<String>,
    // reset on every refresh and never filled in
    pending: IndexSet<String>,
    private: IndexMap<String, Field>,
}

impl ApiObject {
    pub fn new(client: Option<ClientRef>, data: Option<Map<String, Value>>) -> Self {
        Self::with_kind(Kind::default(), client, data)
    }

    /// Build a specialized object. A client preset on `kind` wins over `client`.
    pub fn with_kind(kind: Kind, client: Option<ClientRef>, data: Option<Map<String, Value>>) -> Self {
        let client = kind.client().cloned().or(client);
        let mut object = ApiObject {
            kind,
            client,
            data: IndexMap::new(),
            removed: IndexSet::new(),
            pending: IndexSet::new(),
            private: IndexMap::new(),
        };
        object.refresh(data.unwrap_or_default());
        object
    }

    /// Build from any decoded value; only JSON objects are accepted.
    pub fn from_value(client: Option<ClientRef>, value: Value) -> ResultE<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(client, Some(map))),
            other => Err(Erx::not_an_object(convert::value_type_name(&other))),
        }
    }

    /// Replace the whole content with `snapshot`.
    ///
    /// Keys that were present before and are missing from `snapshot` are added to
    /// the removed set; keys that `snapshot` brings back leave it again.
    pub fn refresh(&mut self, snapshot: Map<String, Value>) {
        let removed: Vec<String> = self.data.keys().filter(|k| !snapshot.contains_key(k.as_str())).cloned().collect();
        self.removed.extend(removed);
        self.pending.clear();
        self.data.clear();
        self.removed.retain(|k| !snapshot.contains_key(k.as_str()));

        for (key, value) in snapshot {
            let converted = convert(value, self.client.as_ref());
            self.data.insert(key, converted);
        }

        tracing::debug!(kind = self.kind.name(), keys = self.data.len(), removed = self.removed.len(), "object refreshed");
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn client(&self) -> Option<&ClientRef> {
        self.client.as_ref()
    }

    /// keys dropped by a refresh and not brought back since
    pub fn removed_keys(&self) -> &IndexSet<String> {
        &self.removed
    }

    pub fn pending_changes(&self) -> &IndexSet<String> {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.data.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.data.get_mut(key)
    }

    /// Like `get`, but a missing key is a key-not-found error.
    pub fn item(&self, key: &str) -> ResultE<&Field> {
        self.data.get(key).ok_or_else(|| Erx::key_not_found(key))
    }

    /// Store `value` as is; no conversion happens outside `refresh`.
    pub fn set<K: Into<String>, V: Into<Field>>(&mut self, key: K, value: V) -> Option<Field> {
        self.data.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> ResultE<Field> {
        self.data.shift_remove(key).ok_or_else(|| Erx::key_not_found(key))
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Field> {
        self.data.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Field> {
        self.data.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Field> {
        self.data.iter()
    }

    fn is_private(&self, name: &str) -> bool {
        name.starts_with(PRIVATE_MARKER) || self.private.contains_key(name)
    }

    /// Attribute-style read.
    ///
    /// Private names read the private slot. Other names read the mapping, and a
    /// missing key surfaces as attribute-not-found carrying the key error.
    pub fn attr(&self, name: &str) -> ResultE<&Field> {
        if name.starts_with(PRIVATE_MARKER) {
            return self.private.get(name).ok_or_else(|| Erx::attribute_not_found(name));
        }
        self.item(name).map_err(Erx::into_attribute_not_found)
    }

    /// Attribute-style write. Public names behave exactly like `set`.
    pub fn set_attr<V: Into<Field>>(&mut self, name: &str, value: V) -> Option<Field> {
        if self.is_private(name) {
            return self.private.insert(name.to_string(), value.into());
        }
        self.set(name, value)
    }

    /// Attribute-style delete. Public names behave exactly like `remove`.
    pub fn del_attr(&mut self, name: &str) -> ResultE<Field> {
        if self.is_private(name) {
            return self.private.shift_remove(name).ok_or_else(|| Erx::attribute_not_found(name));
        }
        self.remove(name)
    }

    pub fn to_value(&self) -> ResultE<Value> {
        serde_json::to_value(self).map_err(Erx::serialization)
    }

    /// Typed view of the object, for resources with a known shape.
    pub fn typed<T: DeserializeOwned>(&self) -> ResultE<T> {
        serde_json::from_value(self.to_value()?).map_err(Erx::serialization)
    }
}

impl PartialEq for ApiObject {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Index<&str> for ApiObject {
    type Output = Field;

    fn index(&self, key: &str) -> &Field {
        &self.data[key]
    }
}

impl IndexMut<&str> for ApiObject {
    fn index_mut(&mut self, key: &str) -> &mut Field {
        &mut self.data[key]
    }
}

impl<'a> IntoIterator for &'a ApiObject {
    type Item = (&'a String, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Serialize for ApiObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (k, v) in &self.data {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ApiObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(|map| ApiObject::new(None, Some(map)))
    }
}

impl FromStr for ApiObject {
    type Err = Erx;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiObject::from_value(None, Dec::de(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_default_is_empty() {
        let o = ApiObject::new(None, None);
        assert!(o.is_empty());
        assert!(o.client().is_none());
        assert!(o.removed_keys().is_empty());
        assert!(o.pending_changes().is_empty());
        assert_eq!(o.kind().name(), kind::DEFAULT_KIND_NAME);
        assert_eq!(o, ApiObject::default());
    }

    #[test]
    fn test_keys_keep_snapshot_order() {
        let o = ApiObject::new(None, Some(snapshot(json!({"z": 1, "a": 2, "m": 3}))));
        let keys: Vec<&str> = o.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_refresh_tracks_removed() {
        let mut o = ApiObject::new(None, Some(snapshot(json!({"x": 1, "y": 2}))));
        o.refresh(snapshot(json!({"y": 3})));
        assert!(!o.contains_key("x"));
        assert!(o.removed_keys().contains("x"));
        assert_eq!(o["y"].as_i64(), Some(3));

        o.refresh(snapshot(json!({"z": 1})));
        assert!(o.removed_keys().contains("x"));
        assert!(o.removed_keys().contains("y"));

        o.refresh(snapshot(json!({"x": 9, "z": 1})));
        assert!(!o.removed_keys().contains("x"));
        assert!(o.removed_keys().contains("y"));
        assert!(o.pending_changes().is_empty());
    }

    #[test]
    fn test_refresh_keeps_private_slot() {
        let mut o = ApiObject::new(None, Some(snapshot(json!({"a": 1}))));
        o.set_attr("_note", "kept");
        o.refresh(snapshot(json!({"b": 2})));
        assert_eq!(o.attr("_note").unwrap().as_str(), Some("kept"));
    }

    #[test]
    fn test_private_attribute_slot() {
        let mut o = ApiObject::new(None, Some(snapshot(json!({"id": "1"}))));
        assert!(o.attr("_hidden").unwrap_err().is_attribute_not_found());

        assert!(o.set_attr("_hidden", 5).is_none());
        assert_eq!(o.attr("_hidden").unwrap().as_i64(), Some(5));
        assert!(!o.contains_key("_hidden"));
        assert_eq!(o.len(), 1);
        assert_eq!(o.to_value().unwrap(), json!({"id": "1"}));

        assert_eq!(o.del_attr("_hidden").unwrap().as_i64(), Some(5));
        assert!(o.del_attr("_hidden").unwrap_err().is_attribute_not_found());
    }

    #[test]
    fn test_private_name_in_data_is_mapping_only() {
        let o = ApiObject::new(None, Some(snapshot(json!({"_links": {"self": "x"}}))));
        assert!(o.get("_links").is_some());
        assert!(o.attr("_links").unwrap_err().is_attribute_not_found());
    }

    #[test]
    fn test_public_attribute_errors() {
        let mut o = ApiObject::new(None, None);
        let err = o.attr("amount").unwrap_err();
        assert!(err.is_attribute_not_found());
        assert_eq!(err.message(), "amount");
        assert!(err.extra_val(crate::erx::EXTRA_ORIGIN).is_some());

        assert!(o.del_attr("amount").unwrap_err().is_key_not_found());
        assert!(o.remove("amount").unwrap_err().is_key_not_found());
        assert!(o.item("amount").unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_set_does_not_convert() {
        let mut o = ApiObject::new(None, None);
        o.set("list", vec![1, 2]);
        o.set("text", "abc");
        assert_eq!(o["list"], Field::Array(vec![Field::from(1), Field::from(2)]));
        o["text"] = Field::Null;
        assert!(o.get("text").unwrap().is_null());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut o = ApiObject::new(None, Some(snapshot(json!({"a": 1, "b": 2, "c": 3}))));
        o.remove("b").unwrap();
        let keys: Vec<&str> = o.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_kind_preset_client_wins() {
        let preset = ClientRef::new(1u8);
        let passed = ClientRef::new(2u8);
        let kind = Kind::named("Charge").with_client(preset.clone());
        let o = ApiObject::with_kind(kind, Some(passed.clone()), Some(snapshot(json!({"meta": {}}))));
        assert!(o.client().unwrap().ptr_eq(&preset));
        let meta = o["meta"].as_object().unwrap();
        assert!(meta.client().unwrap().ptr_eq(&preset));
        assert_eq!(meta.kind().name(), kind::DEFAULT_KIND_NAME);

        let plain = ApiObject::with_kind(Kind::named("Checkout"), Some(passed.clone()), None);
        assert!(plain.client().unwrap().ptr_eq(&passed));
        assert!(format!("{:?}", plain).starts_with("<Checkout id=No ID>"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = ApiObject::from_value(None, json!([1, 2])).unwrap_err();
        assert!(err.is_domain(crate::erx::PreL4::OBJT));
        assert_eq!(err.extra_val("FOUND"), Some("array".to_string()));
    }

    #[test]
    fn test_from_str_and_serde() {
        let o: ApiObject = r#"{"id": "abc", "items": [{"n": 1}]}"#.parse().unwrap();
        assert_eq!(o["items"].as_array().unwrap()[0].as_object().unwrap()["n"].as_i64(), Some(1));

        let encoded = serde_json::to_string(&o).unwrap();
        assert_eq!(encoded, r#"{"id":"abc","items":[{"n":1}]}"#);
        let decoded: ApiObject = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, o);

        assert!("[]".parse::<ApiObject>().is_err());
        assert!("{".parse::<ApiObject>().unwrap_err().is_serialization());
    }

    #[test]
    fn test_typed_view() {
        #[derive(Debug, serde::Deserialize)]
        struct Pricing {
            amount: String,
            currency: String,
        }

        let o = ApiObject::from_value(None, json!({"amount": "1.00", "currency": "USD", "extra": true})).unwrap();
        let pricing: Pricing = o.typed().unwrap();
        assert_eq!(pricing.amount, "1.00");
        assert_eq!(pricing.currency, "USD");

        let missing = ApiObject::default().typed::<Pricing>().unwrap_err();
        assert!(missing.is_serialization());
    }
}
