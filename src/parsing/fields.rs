//! Field helpers shared by the normalizers.
//!
//! Upstream records name the same datum differently from one endpoint (or API
//! revision) to the next, and numbers arrive either as JSON numbers or as strings.
//! These helpers make the lookup order and the coercion rules explicit.

use serde_json::{Map, Value};

/// Whether a value counts as "present" when choosing between field aliases.
///
/// `null`, `false`, empty strings and numeric zero are treated as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the first alias whose value is present.
pub fn first_present<'a>(record: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| record.get(*alias))
        .find(|value| is_truthy(value))
}

/// Renders a scalar as text. Numbers keep their JSON spelling.
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First present alias rendered as text.
pub fn first_text(record: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    first_present(record, aliases).and_then(text_of)
}

/// First present alias coerced to a non-negative number.
pub fn first_number(record: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    first_present(record, aliases).and_then(coerce_non_negative_number)
}

/// Coerces a JSON scalar to a finite, non-negative number.
///
/// Numbers are taken as-is and numeric strings are parsed after trimming. Anything
/// else (null, objects, unparseable or negative values) is `None`. Zero stays
/// `Some(0.0)` so callers can tell it apart from a missing value.
pub fn coerce_non_negative_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number >= 0.0).then_some(number)
}
