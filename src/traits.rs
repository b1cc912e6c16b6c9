//! Trait definitions for the client surface and its transport seam.
//!
//! [`JsonFetcher`] is the single point where the client touches the network. The
//! default implementation is [`HttpFetcher`](crate::HttpFetcher); tests and callers
//! with their own HTTP stack can supply another one through
//! [`Fmp::with_fetcher`](crate::Fmp::with_fetcher).
//!
//! [`CompanyOperations`] groups the lookup operations the `Fmp` client provides.

use super::company::CompanyData;
use super::error::Result;
use super::ownership::OwnershipRecord;
use super::prices::PricePoint;
use super::profile::CompanyProfile;
use super::resolver::ResolvedIdentity;
use async_trait::async_trait;
use serde_json::Value;

/// Transport that issues a GET and decodes the body as JSON.
///
/// Implementations report a non-success status as `FmpError::Transport` and must
/// not retry. Application-level error bodies are detected by the client, so a
/// fetcher only has to return whatever JSON the server sent.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// Operations for resolving a company and loading its market data.
///
/// All operations run sequentially: each upstream call completes before the next
/// one is issued.
#[async_trait]
pub trait CompanyOperations {
    /// Resolves a free-text company name or ticker to a canonical symbol.
    async fn resolve_symbol(&self, term: &str) -> Result<ResolvedIdentity>;
    /// Retrieves the end-of-day close series for a symbol, in upstream order.
    async fn historical_prices(&self, symbol: &str) -> Result<Vec<PricePoint>>;
    /// Retrieves the company profile for a symbol. Unexpected shapes yield an empty profile.
    async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile>;
    /// Retrieves beneficial-ownership filings for a symbol.
    async fn beneficial_ownership(&self, symbol: &str) -> Result<Vec<OwnershipRecord>>;
    /// Resolves `term` and composes prices, ownership and derived statistics.
    ///
    /// Ownership failures are absorbed into an empty list; any other failure is
    /// returned as `FmpError::CompanyData`.
    async fn load_company_data(&self, term: &str) -> Result<CompanyData>;
}
