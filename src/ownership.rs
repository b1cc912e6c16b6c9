//! Beneficial-ownership filings (Schedule 13D/13G acquisitions).
//!
//! Rows come back under several spellings per field; each field lists its aliases in
//! lookup order and the first present one wins. Missing numbers become `0` and
//! missing strings become `""`, so every record has the same shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parsing::fields::{first_number, first_text};

/// One reporting person's position as disclosed in a filing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipRecord {
    pub name: String,
    pub shares_owned: f64,
    pub ownership_percentage: f64,
    pub sole_voting_power: f64,
    pub shared_voting_power: f64,
    pub sole_dispositive_power: f64,
    pub shared_dispositive_power: f64,
    pub filing_date: String,
    pub url: String,
    pub type_of_reporting_person: String,
}

/// Maps raw filing rows onto [`OwnershipRecord`]s. Rows that are not objects are skipped.
pub fn normalize_ownership(rows: &[Value]) -> Vec<OwnershipRecord> {
    rows.iter()
        .filter_map(Value::as_object)
        .map(ownership_record)
        .collect()
}

fn ownership_record(row: &Map<String, Value>) -> OwnershipRecord {
    OwnershipRecord {
        name: text(row, &["nameOfReportingPerson", "name", "reportingPerson"]),
        shares_owned: number(row, &["amountBeneficiallyOwned", "sharesOwned", "amount"]),
        ownership_percentage: number(row, &["percentOfClass", "ownershipPercentage", "percent"]),
        sole_voting_power: number(row, &["soleVotingPower", "soleVoting"]),
        shared_voting_power: number(row, &["sharedVotingPower", "sharedVoting"]),
        sole_dispositive_power: number(row, &["soleDispositivePower", "soleDispositive"]),
        shared_dispositive_power: number(row, &["sharedDispositivePower", "sharedDispositive"]),
        filing_date: text(row, &["filingDate", "date", "filing"]),
        url: text(row, &["url", "link"]),
        type_of_reporting_person: text(row, &["typeOfReportingPerson", "type"]),
    }
}

fn text(row: &Map<String, Value>, aliases: &[&str]) -> String {
    first_text(row, aliases).unwrap_or_default()
}

fn number(row: &Map<String, Value>, aliases: &[&str]) -> f64 {
    first_number(row, aliases).unwrap_or(0.0)
}
