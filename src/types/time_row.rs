use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A single observed or forecast value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Converts a JSON value from an API response. `null` has no field value.
    pub(crate) fn from_json(value: &Value) -> Option<FieldValue> {
        match value {
            Value::Null => None,
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Bool(b) => Some(FieldValue::Number(if *b { 1.0 } else { 0.0 })),
            other => Some(FieldValue::Text(other.to_string())),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// One time-indexed observation: a naive local timestamp plus named fields.
///
/// Rows are identified by `time` alone. Two rows with the same timestamp are
/// never merged field by field; one replaces the other.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRow {
    pub time: NaiveDateTime,
    pub fields: BTreeMap<String, FieldValue>,
}

impl TimeRow {
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}
