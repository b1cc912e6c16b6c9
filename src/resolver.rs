//! Resolution of free-text company names and tickers to canonical symbols.
//!
//! Resolution runs an ordered cascade of strategies and stops at the first one that
//! produces a symbol:
//!
//! ```text
//! direct symbol probe ─► static name table ─► search-name (query)
//!   ─► search-name (_query_) ─► search ─► search-symbol ─► stock-list scan
//! ```
//!
//! A strategy that errors (HTTP failure, API error body, plan restrictions) does not
//! stop the cascade. Its error is recorded and the next strategy runs. Only when every
//! strategy comes up empty does resolution fail, and the error then carries the term
//! and the recorded failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::core::{Endpoint, Fmp};
use super::error::{FmpError, Result, StrategyFailure};
use super::mapping::symbol_for_name;
use super::parsing::envelope::unwrap_records;
use super::parsing::fields::first_text;
use super::profile::CompanyProfile;

const MAX_SYMBOL_LEN: usize = 10;

/// Canonical identity of a resolved security.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIdentity {
    /// Uppercase ticker symbol
    pub symbol: String,
    pub company_name: String,
}

/// User input together with the normalized forms the strategies compare against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerm {
    raw: String,
    upper: String,
    lower: String,
}

impl QueryTerm {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self {
            raw: raw.to_string(),
            upper: trimmed.to_uppercase(),
            lower: trimmed.to_lowercase(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn upper(&self) -> &str {
        &self.upper
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn is_blank(&self) -> bool {
        self.upper.is_empty()
    }

    /// Whether the term could be a ticker: 1 to 10 characters of `A-Z`, `0-9`, `.`, `-`.
    pub fn looks_like_symbol(&self) -> bool {
        (1..=MAX_SYMBOL_LEN).contains(&self.upper.chars().count())
            && self
                .upper
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-')
    }
}

/// A `{symbol, name}` pair pulled out of a search or stock-list record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCandidate {
    pub symbol: String,
    pub name: String,
}

/// How well a candidate matches the term. Later variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchRank {
    Fallback,
    SymbolContains,
    NameContains,
    ExactName,
    ExactSymbol,
}

impl SearchCandidate {
    pub fn from_record(record: &Value) -> Self {
        let Some(fields) = record.as_object() else {
            return Self::default();
        };
        Self {
            symbol: first_text(fields, &["symbol"]).unwrap_or_default(),
            name: first_text(fields, &["name", "companyName"]).unwrap_or_default(),
        }
    }

    pub fn rank(&self, term: &QueryTerm) -> MatchRank {
        let symbol = self.symbol.to_uppercase();
        let name = self.name.to_lowercase();
        if symbol == term.upper() {
            MatchRank::ExactSymbol
        } else if name == term.lower() {
            MatchRank::ExactName
        } else if name.contains(term.lower()) {
            MatchRank::NameContains
        } else if symbol.contains(term.upper()) {
            MatchRank::SymbolContains
        } else {
            MatchRank::Fallback
        }
    }

    /// Matching rule of the stock-list scan: name contains the term, or symbol
    /// equals or contains it.
    fn mentions(&self, term: &QueryTerm) -> bool {
        self.name.to_lowercase().contains(term.lower())
            || self.symbol.to_uppercase().contains(term.upper())
    }

    /// Identity for this candidate, or `None` when it has no symbol.
    pub fn identity(&self) -> Option<ResolvedIdentity> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return None;
        }
        let company_name = if self.name.is_empty() {
            self.symbol.clone()
        } else {
            self.name.clone()
        };
        Some(ResolvedIdentity {
            symbol,
            company_name,
        })
    }
}

/// Picks the best-ranked candidate; among equal ranks the earliest record wins.
pub fn best_match(records: &[Value], term: &QueryTerm) -> Option<SearchCandidate> {
    let mut best: Option<(MatchRank, SearchCandidate)> = None;
    for candidate in records.iter().map(SearchCandidate::from_record) {
        let rank = candidate.rank(term);
        if best.as_ref().is_none_or(|(top, _)| rank > *top) {
            best = Some((rank, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// One step of the resolution cascade.
///
/// `Ok(None)` means "not applicable or nothing found"; `Err` means the strategy
/// failed and the failure should be recorded.
#[async_trait]
pub trait ResolutionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn attempt(&self, fmp: &Fmp, term: &QueryTerm) -> Result<Option<ResolvedIdentity>>;
}

/// Fetches the profile for `symbol` and accepts it if it names a security.
async fn probe_profile(fmp: &Fmp, symbol: &str) -> Result<Option<ResolvedIdentity>> {
    let response = fmp.get_json(Endpoint::Profile, &[("symbol", symbol)]).await?;
    let profile = CompanyProfile::from_response(response);
    if !profile.identifies_security() {
        return Ok(None);
    }
    let resolved = profile
        .symbol()
        .unwrap_or_else(|| symbol.to_string())
        .to_uppercase();
    let company_name = profile
        .company_name()
        .or_else(|| profile.symbol())
        .unwrap_or_else(|| symbol.to_string());
    Ok(Some(ResolvedIdentity {
        symbol: resolved,
        company_name,
    }))
}

/// Treats a ticker-shaped term as a symbol and probes its profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSymbolProbe;

#[async_trait]
impl ResolutionStrategy for DirectSymbolProbe {
    fn name(&self) -> &'static str {
        "profile (direct symbol)"
    }

    async fn attempt(&self, fmp: &Fmp, term: &QueryTerm) -> Result<Option<ResolvedIdentity>> {
        if !term.looks_like_symbol() {
            return Ok(None);
        }
        probe_profile(fmp, term.upper()).await
    }
}

/// Probes the profile of the symbol the static name table maps the term to.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMappingProbe;

#[async_trait]
impl ResolutionStrategy for StaticMappingProbe {
    fn name(&self) -> &'static str {
        "profile (known company)"
    }

    async fn attempt(&self, fmp: &Fmp, term: &QueryTerm) -> Result<Option<ResolvedIdentity>> {
        let Some(symbol) = symbol_for_name(term.lower()) else {
            return Ok(None);
        };
        probe_profile(fmp, symbol).await
    }
}

/// A search endpoint queried with one parameter spelling.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy {
    name: &'static str,
    endpoint: Endpoint,
    param: &'static str,
    /// Send the uppercase term instead of the raw input.
    uppercase_term: bool,
}

impl SearchStrategy {
    pub const NAME_QUERY: Self = Self {
        name: "search-name (query)",
        endpoint: Endpoint::SearchName,
        param: "query",
        uppercase_term: false,
    };
    pub const NAME_ALT_QUERY: Self = Self {
        name: "search-name (_query_)",
        endpoint: Endpoint::SearchName,
        param: "_query_",
        uppercase_term: false,
    };
    pub const GENERAL: Self = Self {
        name: "search",
        endpoint: Endpoint::Search,
        param: "query",
        uppercase_term: false,
    };
    pub const SYMBOL: Self = Self {
        name: "search-symbol",
        endpoint: Endpoint::SearchSymbol,
        param: "query",
        uppercase_term: true,
    };
}

#[async_trait]
impl ResolutionStrategy for SearchStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(&self, fmp: &Fmp, term: &QueryTerm) -> Result<Option<ResolvedIdentity>> {
        let query = if self.uppercase_term {
            term.upper()
        } else {
            term.raw()
        };
        let response = fmp.get_json(self.endpoint, &[(self.param, query)]).await?;
        let records = unwrap_records(response);
        Ok(best_match(&records, term).and_then(|candidate| candidate.identity()))
    }
}

/// Downloads the full stock list and scans it linearly.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockListScan;

#[async_trait]
impl ResolutionStrategy for StockListScan {
    fn name(&self) -> &'static str {
        "stock-list"
    }

    async fn attempt(&self, fmp: &Fmp, term: &QueryTerm) -> Result<Option<ResolvedIdentity>> {
        let records = unwrap_records(fmp.get_json(Endpoint::StockList, &[]).await?);
        tracing::debug!(records = records.len(), "scanning stock list");
        Ok(records
            .iter()
            .map(SearchCandidate::from_record)
            .find(|candidate| candidate.mentions(term))
            .and_then(|candidate| candidate.identity()))
    }
}

/// Ordered cascade of [`ResolutionStrategy`]s.
pub struct SymbolResolver {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl Default for SymbolResolver {
    fn default() -> Self {
        Self::new(vec![
            Box::new(DirectSymbolProbe),
            Box::new(StaticMappingProbe),
            Box::new(SearchStrategy::NAME_QUERY),
            Box::new(SearchStrategy::NAME_ALT_QUERY),
            Box::new(SearchStrategy::GENERAL),
            Box::new(SearchStrategy::SYMBOL),
            Box::new(StockListScan),
        ])
    }
}

impl SymbolResolver {
    pub fn new(strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Runs the cascade for `term`.
    ///
    /// # Errors
    ///
    /// Returns `FmpError::Resolution` when the term is blank or no strategy yields a
    /// symbol. Individual strategy errors never surface on their own.
    pub async fn resolve(&self, fmp: &Fmp, term: &str) -> Result<ResolvedIdentity> {
        let query = QueryTerm::new(term);
        let mut failures = Vec::new();

        if query.is_blank() {
            return Err(FmpError::Resolution {
                term: term.to_string(),
                failures,
            });
        }

        for strategy in &self.strategies {
            match strategy.attempt(fmp, &query).await {
                Ok(Some(identity)) if !identity.symbol.is_empty() => {
                    tracing::info!(
                        term,
                        symbol = %identity.symbol,
                        strategy = strategy.name(),
                        "resolved company"
                    );
                    return Ok(identity);
                }
                Ok(_) => {
                    tracing::debug!(term, strategy = strategy.name(), "no match");
                }
                Err(e) => {
                    tracing::debug!(term, strategy = strategy.name(), error = %e, "strategy failed");
                    failures.push(StrategyFailure {
                        strategy: strategy.name(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(FmpError::Resolution {
            term: term.to_string(),
            failures,
        })
    }
}
