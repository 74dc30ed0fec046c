use crate::erx::{Erx, ResultE};
use serde::{de::DeserializeOwned, Serialize};

pub struct Enc;
pub struct Dec;

impl Enc {
    pub fn en<T: Serialize>(obj: &T) -> ResultE<String> {
        serde_json::to_string(obj).map_err(Erx::serialization)
    }

    pub fn pretty<T: Serialize>(obj: &T) -> ResultE<String> {
        serde_json::to_string_pretty(obj).map_err(Erx::serialization)
    }

    /// pretty print with `indent` spaces per level
    pub fn pretty_indent<T: Serialize>(obj: &T, indent: usize) -> ResultE<String> {
        let indent = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        obj.serialize(&mut ser).map_err(Erx::serialization)?;
        String::from_utf8(buf).map_err(Erx::serialization)
    }
}

impl Dec {
    pub fn de<T: DeserializeOwned>(json: &str) -> ResultE<T> {
        serde_json::from_str(json).map_err(Erx::serialization)
    }
}
