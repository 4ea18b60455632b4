use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::response::value_at;

/// Record is the typed attribute bag produced from one JSON object.
///
/// Keys keep the order they had in the response. Values are copied as-is:
/// no renaming, no coercion, no validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Build a record from a JSON object, leaving out the `skip` keys
    pub fn from_map(map: Map<String, Value>, skip: &[&str]) -> Self {
        if skip.is_empty() {
            return Record(map);
        }

        Record(
            map.into_iter()
                .filter(|(key, _)| !skip.contains(&key.as_str()))
                .collect(),
        )
    }

    /// Build a record from a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: Value, skip: &[&str]) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from_map(map, skip)),
            _ => None,
        }
    }

    /// Map every object of a JSON array, in order. Anything that is not an
    /// array yields an empty vector; non-object elements are ignored.
    pub fn map_many(value: Value, skip: &[&str]) -> Vec<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| Self::from_value(item, skip))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a value by a slash-separated path, e.g. `Description/Text`
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        self.0.get(path).or_else(|| {
            let (head, rest) = path.split_once('/')?;
            value_at(self.0.get(head)?, rest)
        })
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Get an identifier; the API sends some IDs as numbers and some as
    /// numeric strings
    pub fn get_id(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(as_id)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// View a nested object as a record of its own
    pub fn record(&self, key: &str) -> Option<Record> {
        match self.get(key)? {
            Value::Object(map) => Some(Record(map.clone())),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Plain JSON mapping of this record, nested records included
    pub fn to_plain(&self) -> Map<String, Value> {
        self.0.clone()
    }

    pub fn into_plain(self) -> Map<String, Value> {
        self.0
    }

    /// Deserialize the record into a caller-defined type
    pub fn apply<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| e.into())
    }
}

/// Read an ID sent either as a number or as a numeric string
pub(crate) fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}
