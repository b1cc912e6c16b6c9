//! Company profile records.
//!
//! The profile endpoint returns either a single object or a one-element list, and the
//! numeric fields have been renamed across API revisions (`mktCap` vs `marketCap`,
//! `volAvg` vs `averageVolume`). [`CompanyProfile`] keeps the raw record and exposes
//! alias-aware accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parsing::fields::{coerce_non_negative_number, first_present, first_text};

const MARKET_CAP: &[&str] = &["mktCap", "marketCap"];
const SHARES_OUTSTANDING: &[&str] = &["sharesOutstanding"];
const FREE_FLOAT: &[&str] = &["floatShares", "freeFloat"];
const AVG_VOLUME: &[&str] = &["volAvg", "averageVolume"];

/// Raw profile record with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyProfile {
    fields: Map<String, Value>,
}

impl CompanyProfile {
    /// Builds a profile from a decoded response.
    ///
    /// A list contributes its first element; anything that is not an object yields an
    /// empty profile.
    pub fn from_response(value: Value) -> Self {
        let record = match value {
            Value::Array(items) => items.into_iter().next(),
            other => Some(other),
        };
        match record {
            Some(Value::Object(fields)) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn symbol(&self) -> Option<String> {
        first_text(&self.fields, &["symbol"])
    }

    pub fn company_name(&self) -> Option<String> {
        first_text(&self.fields, &["companyName", "name"])
    }

    /// Whether the record actually describes a security, i.e. carries a symbol or a name.
    pub fn identifies_security(&self) -> bool {
        first_present(&self.fields, &["symbol", "companyName", "name"]).is_some()
    }

    pub fn price(&self) -> Option<f64> {
        self.number(&["price"])
    }

    pub fn market_cap(&self) -> Option<f64> {
        self.number(MARKET_CAP)
    }

    pub fn shares_outstanding(&self) -> Option<f64> {
        self.number(SHARES_OUTSTANDING)
    }

    pub fn free_float(&self) -> Option<f64> {
        self.number(FREE_FLOAT)
    }

    pub fn avg_trading_volume(&self) -> Option<f64> {
        self.number(AVG_VOLUME)
    }

    pub fn currency(&self) -> Option<String> {
        first_text(&self.fields, &["currency"])
    }

    // Zero is a reported value here, so aliases are tried until one coerces.
    fn number(&self, aliases: &[&str]) -> Option<f64> {
        aliases
            .iter()
            .filter_map(|alias| self.fields.get(*alias))
            .find_map(coerce_non_negative_number)
    }
}
