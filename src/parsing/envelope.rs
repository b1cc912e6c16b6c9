//! Extraction of record lists from the provider's response envelopes.
//!
//! The same logical payload arrives in several shapes depending on the endpoint:
//!
//! ```text
//! [ {..}, {..} ]                       bare list
//! { "results": [ {..} ] }              list under a known key
//! { "symbol": "X", "rows": [ {..} ] }  list under some other key
//! { "symbol": "X" }                    no list at all
//! ```
//!
//! [`Envelope::classify`] maps a decoded value onto a closed set of variants and
//! [`Envelope::extract`] pulls the records out, so every call site unwraps the
//! same way.

use serde_json::Value;

/// Shape of a decoded response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// The value is the record list itself.
    BareList,
    /// First property (in document order) holding a list. Covers the usual
    /// `data` and `results` wrappers.
    FirstListProperty(String),
    /// Nothing that looks like a record list.
    Empty,
}

impl Envelope {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Array(_) => Envelope::BareList,
            Value::Object(map) => map
                .iter()
                .find(|(_, v)| v.is_array())
                .map(|(key, _)| Envelope::FirstListProperty(key.clone()))
                .unwrap_or(Envelope::Empty),
            _ => Envelope::Empty,
        }
    }

    /// Moves the records out of `value` according to this shape.
    pub fn extract(self, value: Value) -> Vec<Value> {
        match (self, value) {
            (Envelope::BareList, Value::Array(records)) => records,
            (Envelope::FirstListProperty(key), Value::Object(mut map)) => take_list(&mut map, &key),
            _ => Vec::new(),
        }
    }
}

fn take_list(map: &mut serde_json::Map<String, Value>, key: &str) -> Vec<Value> {
    match map.remove(key) {
        Some(Value::Array(records)) => records,
        _ => Vec::new(),
    }
}

/// Extracts the record list from any supported envelope.
pub fn unwrap_records(value: Value) -> Vec<Value> {
    Envelope::classify(&value).extract(value)
}

/// Extracts historical price records.
///
/// Besides the generic shapes, price history arrives as `{ "historical": [..] }`
/// or keyed by symbol as `{ "AAPL": { "historical": [..] } }`.
pub fn unwrap_historical(value: Value) -> Vec<Value> {
    let Value::Object(mut map) = value else {
        return unwrap_records(value);
    };

    if map.get("historical").is_some_and(Value::is_array) {
        return take_list(&mut map, "historical");
    }

    let nested = map
        .iter()
        .find(|(_, v)| v.get("historical").is_some_and(Value::is_array))
        .map(|(key, _)| key.clone());
    if let Some(key) = nested {
        if let Some(Value::Object(mut inner)) = map.remove(&key) {
            return take_list(&mut inner, "historical");
        }
    }

    unwrap_records(Value::Object(map))
}
