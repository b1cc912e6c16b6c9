//! # FmpKit - company lookup on top of Financial Modeling Prep
//!
//! FmpKit turns a free-text company name or ticker into a canonical symbol and loads
//! the data a company page needs from the [Financial Modeling Prep](https://site.financialmodelingprep.com)
//! stable API.
//!
//! ## Features
//!
//! - **Symbol resolution** - An ordered cascade of direct probe, known-company table,
//!   search endpoints and a stock-list scan
//! - **Response normalization** - Tolerates the several envelope shapes and field
//!   spellings the API returns
//! - **Price history** - End-of-day closes with 52-week range and latest close
//! - **Ownership** - Beneficial-ownership filings, loaded on a best-effort basis
//!
//! ## Requirements
//!
//! FmpKit is async and requires a runtime. We recommend [tokio](https://tokio.rs).
//! An API key is read from `FMP_API_KEY` by [`Fmp::from_env`] or passed explicitly.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use fmpkit::{CompanyOperations, Fmp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fmp = Fmp::from_env()?;
//!
//!     let data = fmp.load_company_data("apple").await?;
//!     println!("{} ({})", data.company_name, data.symbol);
//!
//!     for point in data.price_data.historical.iter().take(5) {
//!         println!("{}: {}", point.date, point.close);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod company;
mod config;
mod core;
mod error;
mod mapping;
mod ownership;
pub mod parsing;
mod prices;
mod profile;
mod resolver;
mod stats;
mod traits;

#[cfg(test)]
mod testing;

pub use config::{API_KEY_ENV, DEFAULT_BASE_URL, FmpConfig};
pub use core::{Endpoint, Fmp, HttpFetcher};
pub use error::{FmpError, Result, StrategyFailure};

pub use company::CompanyData;
pub use mapping::symbol_for_name;
pub use ownership::{OwnershipRecord, normalize_ownership};
pub use prices::{PriceData, PricePoint, normalize_prices};
pub use profile::CompanyProfile;
pub use resolver::{
    DirectSymbolProbe, MatchRank, QueryTerm, ResolutionStrategy, ResolvedIdentity,
    SearchCandidate, SearchStrategy, StaticMappingProbe, StockListScan, SymbolResolver,
    best_match,
};
pub use stats::{BasicStats, aggregate, aggregate_as_of};

pub use traits::{CompanyOperations, JsonFetcher};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
