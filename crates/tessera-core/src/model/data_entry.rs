//! Typed key/value entries used by data transactions and custom data v2.
//!
//! JSON shape: `{"key": "k", "type": "integer" | "boolean" | "binary" | "string", "value": ...}`.
//! Binary values are base64 strings (`base64:` prefix optional).
//!
//! `type` may be omitted on input; it is then taken from the JSON value (bool,
//! number or string). Binary entries always need an explicit `type`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry", into = "RawEntry")]
pub struct DataEntry {
    pub key: String,
    pub value: DataValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    Integer(i64),
    Boolean(bool),
    /// Base64 string.
    Binary(String),
    String(String),
}

impl DataValue {
    /// Wire tag byte.
    pub fn tag(&self) -> u8 {
        match self {
            DataValue::Integer(_) => 0,
            DataValue::Boolean(_) => 1,
            DataValue::Binary(_) => 2,
            DataValue::String(_) => 3,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Integer(_) => "integer",
            DataValue::Boolean(_) => "boolean",
            DataValue::Binary(_) => "binary",
            DataValue::String(_) => "string",
        }
    }
}

impl DataEntry {
    pub fn integer(key: impl Into<String>, v: i64) -> Self {
        Self {
            key: key.into(),
            value: DataValue::Integer(v),
        }
    }

    pub fn boolean(key: impl Into<String>, v: bool) -> Self {
        Self {
            key: key.into(),
            value: DataValue::Boolean(v),
        }
    }

    /// Binary entry from raw bytes.
    pub fn binary(key: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: DataValue::Binary(crate::crypto::base64_encode(bytes)),
        }
    }

    pub fn string(key: impl Into<String>, v: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: DataValue::String(v.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEntry {
    key: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    value: RawValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl TryFrom<RawEntry> for DataEntry {
    type Error = String;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let Some(kind) = raw.kind else {
            let value = match raw.value {
                RawValue::Bool(v) => DataValue::Boolean(v),
                RawValue::Int(v) => DataValue::Integer(v),
                RawValue::Str(v) => DataValue::String(v),
            };
            return Ok(Self { key: raw.key, value });
        };
        let value = match (kind.as_str(), raw.value) {
            ("integer", RawValue::Int(v)) => DataValue::Integer(v),
            ("boolean", RawValue::Bool(v)) => DataValue::Boolean(v),
            ("binary", RawValue::Str(v)) => DataValue::Binary(v),
            ("string", RawValue::Str(v)) => DataValue::String(v),
            (kind, value) => {
                return Err(format!(
                    "data entry `{}`: value {value:?} does not match type `{kind}`",
                    raw.key
                ))
            }
        };
        Ok(Self { key: raw.key, value })
    }
}

impl From<DataEntry> for RawEntry {
    fn from(e: DataEntry) -> Self {
        let kind = Some(e.value.type_name().to_string());
        let value = match e.value {
            DataValue::Integer(v) => RawValue::Int(v),
            DataValue::Boolean(v) => RawValue::Bool(v),
            DataValue::Binary(v) | DataValue::String(v) => RawValue::Str(v),
        };
        Self { key: e.key, kind, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let e = DataEntry::integer("twoThree", 2);
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v, serde_json::json!({"key": "twoThree", "type": "integer", "value": 2}));

        let back: DataEntry = serde_json::from_value(v).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn mismatched_type_is_rejected() {
        let r: Result<DataEntry, _> =
            serde_json::from_value(serde_json::json!({"key": "k", "type": "boolean", "value": 1}));
        assert!(r.is_err());
    }

    #[test]
    fn type_is_inferred_when_absent() {
        let entries: Vec<DataEntry> = serde_json::from_value(serde_json::json!([
            {"key": "oneTwo", "value": false},
            {"key": "twoThree", "value": 2},
            {"key": "four", "value": "text"},
        ]))
        .unwrap();
        assert_eq!(
            entries,
            vec![
                DataEntry::boolean("oneTwo", false),
                DataEntry::integer("twoThree", 2),
                DataEntry::string("four", "text"),
            ]
        );

        // Output always carries the type.
        let v = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(v["type"], "boolean");
    }

    #[test]
    fn binary_constructor_uses_prefix() {
        let e = DataEntry::binary("three", &[1, 2, 3, 4, 5, 6]);
        assert_eq!(e.value, DataValue::Binary("base64:AQIDBAUG".to_string()));
    }
}
