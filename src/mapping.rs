//! Well-known company names mapped to their symbols.
//!
//! Search endpoints are not available on every API plan, so a handful of large-cap
//! names resolve through this table first. A miss only means there is no shortcut.

use std::collections::HashMap;
use std::sync::LazyLock;

const COMMON_COMPANIES: &[(&str, &str)] = &[
    ("microsoft", "MSFT"),
    ("apple", "AAPL"),
    ("amazon", "AMZN"),
    ("alphabet", "GOOGL"),
    ("google", "GOOGL"),
    ("meta", "META"),
    ("facebook", "META"),
    ("tesla", "TSLA"),
    ("nvidia", "NVDA"),
    ("netflix", "NFLX"),
    // Korea Exchange listing
    ("samsung", "005930"),
    ("samsung electronics", "005930"),
    ("intel", "INTC"),
    ("amd", "AMD"),
    ("oracle", "ORCL"),
    ("ibm", "IBM"),
    ("cisco", "CSCO"),
    ("adobe", "ADBE"),
    ("salesforce", "CRM"),
    ("paypal", "PYPL"),
    ("visa", "V"),
    ("mastercard", "MA"),
    ("jpmorgan", "JPM"),
    ("bank of america", "BAC"),
    ("goldman sachs", "GS"),
    ("morgan stanley", "MS"),
    ("disney", "DIS"),
    ("nike", "NKE"),
    ("coca cola", "KO"),
    ("pepsi", "PEP"),
    ("walmart", "WMT"),
    ("target", "TGT"),
    ("home depot", "HD"),
    ("mcdonalds", "MCD"),
    ("starbucks", "SBUX"),
];

static SYMBOLS_BY_NAME: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COMMON_COMPANIES.iter().copied().collect());

/// Looks up the symbol for an already-lowercased company name.
///
/// Keys are matched exactly: `"Apple"` misses, `"apple"` hits.
pub fn symbol_for_name(name: &str) -> Option<&'static str> {
    SYMBOLS_BY_NAME.get(name).copied()
}
