//! Success-envelope normalization
//!
//! Across dialects and endpoints the same logical collection arrives as a
//! bare JSON array, `{"data": [...]}`, or `{"items": [...]}`. The envelope
//! is modeled as a tagged variant resolved with one exhaustive match rather
//! than ad hoc optional-field probing; malformed shapes degrade to empty and
//! never error.

use serde_json::Value;

/// The recognized success-envelope shapes
#[derive(Debug)]
pub enum Envelope {
    Array(Vec<Value>),
    DataWrapper(Vec<Value>),
    ItemsWrapper(Vec<Value>),
    Unknown,
}

impl Envelope {
    /// Classify a response body. `data` is checked before `items` when both
    /// are present.
    pub fn from_value(body: Value) -> Self {
        match body {
            Value::Array(records) => Envelope::Array(records),
            Value::Object(mut map) => {
                if matches!(map.get("data"), Some(Value::Array(_)))
                    && let Some(Value::Array(records)) = map.remove("data")
                {
                    return Envelope::DataWrapper(records);
                }
                if matches!(map.get("items"), Some(Value::Array(_)))
                    && let Some(Value::Array(records)) = map.remove("items")
                {
                    return Envelope::ItemsWrapper(records);
                }
                Envelope::Unknown
            }
            _ => Envelope::Unknown,
        }
    }

    /// Unwrap into a plain ordered record sequence
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Envelope::Array(records)
            | Envelope::DataWrapper(records)
            | Envelope::ItemsWrapper(records) => records,
            Envelope::Unknown => Vec::new(),
        }
    }
}

/// Convenience: classify and unwrap in one step
pub fn unwrap_records(body: Value) -> Vec<Value> {
    Envelope::from_value(body).into_records()
}
