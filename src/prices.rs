//! End-of-day price history.
//!
//! The "light" historical endpoint reports a generic `price` field rather than
//! `close`. Records without a usable date or with a close that is missing, zero or
//! negative are dropped here and never reach the statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parsing::fields::{coerce_non_negative_number, first_present, text_of};

const CLOSE_FIELDS: &[&str] = &["price", "close"];

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Price series wrapper in the shape consumed by the display layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub historical: Vec<PricePoint>,
}

/// Converts raw historical records into price points, keeping input order.
pub fn normalize_prices(raw: &[Value]) -> Vec<PricePoint> {
    raw.iter()
        .filter_map(Value::as_object)
        .filter_map(price_point)
        .collect()
}

fn price_point(record: &Map<String, Value>) -> Option<PricePoint> {
    let date = first_present(record, &["date"])
        .and_then(text_of)
        .and_then(|text| parse_date(&text))?;
    let close = CLOSE_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .find(|value| !value.is_null())
        .and_then(coerce_non_negative_number)
        .filter(|close| *close > 0.0)?;
    Some(PricePoint { date, close })
}

/// Parses the leading `YYYY-MM-DD` of a date or timestamp string.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let day = text.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
