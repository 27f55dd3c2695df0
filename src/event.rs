//! Normalized event representation.
//!
//! Every parser reduces its input to a flat, ordered field-to-value
//! mapping. Values are a tagged union: the scalar kinds feed the rule
//! engine's text blob, while booleans and nested structures are retained
//! on the event but never searched.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single field value on an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Null,
    /// Booleans, arrays and objects: kept on the event, excluded from
    /// the searchable text blob.
    Nested(Value),
}

impl FieldValue {
    /// String form of this value for text-blob construction.
    /// `None` for null and nested values.
    pub fn blob_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Null | Self::Nested(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::Null => Value::Null,
            Self::Nested(v) => v.clone(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::Nested(Value::Number(n))
                }
            }
            Value::Null => Self::Null,
            other => Self::Nested(other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Null => serializer.serialize_unit(),
            Self::Nested(v) => v.serialize(serializer),
        }
    }
}

/// One normalized unit of log data.
///
/// Field order is insertion order, which parsers align with source order
/// (JSON key order, CSV header order). The rule engine depends on this
/// for deterministic text blobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    fields: Vec<(String, FieldValue)>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The `message` field, when present and textual.
    pub fn message(&self) -> Option<&str> {
        self.get("message").and_then(FieldValue::as_str)
    }

    /// Build an event from a parsed JSON object, keeping key order.
    pub fn from_json_object(object: serde_json::Map<String, Value>) -> Self {
        let fields = object
            .into_iter()
            .map(|(name, value)| (name, FieldValue::from(value)))
            .collect();
        Self { fields }
    }

    pub fn to_json(&self) -> Value {
        let mut object = serde_json::Map::with_capacity(self.fields.len());
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.to_json());
        }
        Value::Object(object)
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let object = serde_json::Map::deserialize(deserializer)?;
        Ok(Self::from_json_object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_keeps_key_order() {
        let value = json!({"z": 1, "a": "two", "m": null});
        let Value::Object(object) = value else {
            panic!("expected object")
        };
        let event = Event::from_json_object(object);
        let names: Vec<&str> = event.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn nested_values_have_no_blob_text() {
        let event = Event::from_json_object(
            json!({"a": [1, 2], "b": {"c": 1}, "d": true, "e": null})
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert!(event.iter().all(|(_, v)| v.blob_text().is_none()));
    }

    #[test]
    fn scalar_blob_text() {
        assert_eq!(FieldValue::Text("x".into()).blob_text().as_deref(), Some("x"));
        assert_eq!(FieldValue::Int(42).blob_text().as_deref(), Some("42"));
        assert_eq!(FieldValue::Float(2.5).blob_text().as_deref(), Some("2.5"));
    }

    #[test]
    fn message_accessor() {
        let mut event = Event::new();
        event.insert("message", "hello");
        assert_eq!(event.message(), Some("hello"));

        let mut event = Event::new();
        event.insert("message", FieldValue::Int(7));
        assert_eq!(event.message(), None);
    }

    #[test]
    fn round_trips_through_serde() {
        let mut event = Event::new();
        event.insert("msg", "a b");
        event.insert("count", FieldValue::Int(3));
        let text = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
    }
}
