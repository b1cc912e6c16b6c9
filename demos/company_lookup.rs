//! Company lookup example
//!
//! Resolves a company name or ticker and prints the composed company data:
//! - Symbol resolution through the strategy cascade
//! - Price history and derived statistics
//! - Beneficial-ownership filings (empty when the plan does not include them)
//!
//! Run with: `FMP_API_KEY=... cargo run --example company_lookup -- "bank of america"`
//! Add `RUST_LOG=fmpkit=debug` to see each request and strategy.

use fmpkit::{CompanyOperations, Fmp};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();

    let term = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let term = if term.trim().is_empty() {
        "AAPL".to_string()
    } else {
        term
    };

    let fmp = Fmp::from_env()?;

    println!("=== Looking up \"{}\" ===\n", term);
    let data = fmp.load_company_data(&term).await?;

    println!("✓ {} ({})", data.company_name, data.symbol);
    let stats = &data.basic_stats;
    if let Some(price) = stats.price {
        println!("✓ Price: {:.2} {}", price, stats.currency);
    }
    if let (Some(low), Some(high)) = (stats.fifty_two_week_low, stats.fifty_two_week_high) {
        println!("✓ 52-week range: {:.2} - {:.2}", low, high);
    }
    println!("✓ {} daily closes", data.price_data.historical.len());
    println!("✓ {} ownership filings\n", data.ownership_data.len());

    println!("{}", serde_json::to_string_pretty(&data.basic_stats)?);

    Ok(())
}
