//! Company lookup: resolution, price history, profile and ownership in one call.
//!
//! `load_company_data` is the entry point for display layers. It resolves the term,
//! then loads the price series and the profile (both required) and finally the
//! beneficial-ownership filings, which are supplementary: if they cannot be loaded
//! the result simply carries an empty list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::CompanyOperations;
use super::core::{Endpoint, Fmp};
use super::error::{FmpError, Result};
use super::ownership::{OwnershipRecord, normalize_ownership};
use super::parsing::envelope::{unwrap_historical, unwrap_records};
use super::prices::{PriceData, PricePoint, normalize_prices};
use super::profile::CompanyProfile;
use super::resolver::{ResolvedIdentity, SymbolResolver};
use super::stats::{BasicStats, aggregate};

/// Everything the company page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyData {
    pub symbol: String,
    pub company_name: String,
    pub price_data: PriceData,
    pub ownership_data: Vec<OwnershipRecord>,
    pub basic_stats: BasicStats,
}

/// Implementation of the company lookup operations.
///
/// # Examples
///
/// ```ignore
/// # use fmpkit::{Fmp, CompanyOperations};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fmp = Fmp::from_env()?;
///
/// let data = fmp.load_company_data("microsoft").await?;
/// println!("{} ({})", data.company_name, data.symbol);
/// println!("52w range: {:?} - {:?}", data.basic_stats.fifty_two_week_low, data.basic_stats.fifty_two_week_high);
/// # Ok(())
/// # }
/// ```
#[async_trait]
impl CompanyOperations for Fmp {
    async fn resolve_symbol(&self, term: &str) -> Result<ResolvedIdentity> {
        SymbolResolver::default().resolve(self, term).await
    }

    /// Reads the "light" end-of-day endpoint, which reports `price` rather than `close`.
    async fn historical_prices(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        let response = self
            .get_json(Endpoint::HistoricalPriceLight, &[("symbol", symbol)])
            .await?;
        let records = unwrap_historical(response);
        let points = normalize_prices(&records);
        tracing::debug!(
            symbol,
            records = records.len(),
            points = points.len(),
            "normalized price history"
        );
        Ok(points)
    }

    async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let response = self.get_json(Endpoint::Profile, &[("symbol", symbol)]).await?;
        Ok(CompanyProfile::from_response(response))
    }

    async fn beneficial_ownership(&self, symbol: &str) -> Result<Vec<OwnershipRecord>> {
        let response = self
            .get_json(Endpoint::BeneficialOwnership, &[("symbol", symbol)])
            .await?;
        Ok(normalize_ownership(&unwrap_records(response)))
    }

    async fn load_company_data(&self, term: &str) -> Result<CompanyData> {
        self.compose_company_data(term)
            .await
            .map_err(|e| FmpError::CompanyData(Box::new(e)))
    }
}

impl Fmp {
    async fn compose_company_data(&self, term: &str) -> Result<CompanyData> {
        let ResolvedIdentity {
            symbol,
            company_name,
        } = self.resolve_symbol(term).await?;

        let historical = self.historical_prices(&symbol).await?;
        let profile = self.company_profile(&symbol).await?;
        let basic_stats = aggregate(&historical, &profile);
        let ownership_data = self.ownership_or_empty(&symbol).await;

        Ok(CompanyData {
            symbol,
            company_name,
            price_data: PriceData { historical },
            ownership_data,
            basic_stats,
        })
    }

    async fn ownership_or_empty(&self, symbol: &str) -> Vec<OwnershipRecord> {
        match self.beneficial_ownership(symbol).await {
            Ok(records) => records,
            Err(cause) => {
                let err = FmpError::SupplementaryData {
                    symbol: symbol.to_string(),
                    cause: Box::new(cause),
                };
                tracing::warn!("{}", err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedFetcher, scripted_client};
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn days_ago(days: i64) -> String {
        (Utc::now().date_naive() - Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    fn recent_prices() -> Value {
        json!([
            {"symbol": "AAPL", "date": days_ago(1), "price": 100.0, "volume": 1},
            {"symbol": "AAPL", "date": days_ago(30), "price": "150", "volume": 1},
            {"symbol": "AAPL", "date": days_ago(90), "price": 80, "volume": 1},
            {"symbol": "AAPL", "date": days_ago(91), "price": 0, "volume": 1}
        ])
    }

    fn apple_fetcher() -> ScriptedFetcher {
        ScriptedFetcher::new()
            .with_json(
                "/profile?symbol=AAPL",
                json!([{
                    "symbol": "AAPL",
                    "companyName": "Apple Inc.",
                    "currency": "USD",
                    "marketCap": 3.4e12,
                    "averageVolume": 52000000
                }]),
            )
            .with_json("/historical-price-eod/light?symbol=AAPL", recent_prices())
    }

    #[tokio::test]
    async fn test_load_company_data() {
        let fetcher = Arc::new(apple_fetcher().with_json(
            "/acquisition-of-beneficial-ownership?symbol=AAPL",
            json!([{"nameOfReportingPerson": "Vanguard Group Inc", "amountBeneficiallyOwned": "1322478992"}]),
        ));
        let fmp = scripted_client(&fetcher);

        let data = fmp.load_company_data("AAPL").await.unwrap();

        assert_eq!(data.symbol, "AAPL");
        assert_eq!(data.company_name, "Apple Inc.");
        assert_eq!(data.price_data.historical.len(), 3);
        assert_eq!(data.basic_stats.fifty_two_week_low, Some(80.0));
        assert_eq!(data.basic_stats.fifty_two_week_high, Some(150.0));
        assert_eq!(data.basic_stats.latest_close, Some(100.0));
        assert_eq!(data.basic_stats.price, Some(100.0));
        assert_eq!(data.basic_stats.market_cap, Some(3.4e12));
        assert_eq!(data.basic_stats.avg_trading_volume, Some(52_000_000.0));
        assert_eq!(data.ownership_data.len(), 1);
        assert_eq!(data.ownership_data[0].name, "Vanguard Group Inc");

        assert_eq!(
            fetcher.calls(),
            vec![
                "/profile?symbol=AAPL",
                "/historical-price-eod/light?symbol=AAPL",
                "/profile?symbol=AAPL",
                "/acquisition-of-beneficial-ownership?symbol=AAPL",
            ]
        );
    }

    #[tokio::test]
    async fn test_ownership_failure_is_absorbed() {
        let fetcher = Arc::new(
            apple_fetcher().with_status("/acquisition-of-beneficial-ownership?symbol=AAPL", 500),
        );
        let fmp = scripted_client(&fetcher);

        let data = fmp.load_company_data("aapl").await.unwrap();

        assert!(data.ownership_data.is_empty());
        assert_eq!(data.symbol, "AAPL");
        assert_eq!(data.price_data.historical.len(), 3);
    }

    #[tokio::test]
    async fn test_ownership_error_body_is_absorbed() {
        let fetcher = Arc::new(apple_fetcher().with_json(
            "/acquisition-of-beneficial-ownership?symbol=AAPL",
            json!({"Error Message": "Premium endpoint"}),
        ));
        let fmp = scripted_client(&fetcher);

        let data = fmp.load_company_data("AAPL").await.unwrap();
        assert!(data.ownership_data.is_empty());
    }

    #[tokio::test]
    async fn test_price_failure_is_fatal() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with_json("/profile?symbol=AAPL", json!({"symbol": "AAPL"}))
                .with_status("/historical-price-eod/light?symbol=AAPL", 502),
        );
        let fmp = scripted_client(&fetcher);

        let err = fmp.load_company_data("AAPL").await.unwrap_err();

        assert!(matches!(err, FmpError::CompanyData(_)));
        assert!(
            err.to_string()
                .starts_with("Failed to fetch company data: API Error 502")
        );
        assert_eq!(fetcher.calls_to("/acquisition-of-beneficial-ownership"), 0);
    }

    #[tokio::test]
    async fn test_resolution_failure_is_wrapped() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        let fmp = scripted_client(&fetcher);

        let err = fmp
            .load_company_data("zzz_not_a_company_zzz")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Failed to fetch company data: Unable to find company"));
        assert!(message.contains("zzz_not_a_company_zzz"));
        assert!(err.last_strategy_error().is_some());
    }

    #[tokio::test]
    async fn test_wrapped_history_and_empty_profile() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with_json("/profile?symbol=SAP", json!([{"symbol": "SAP"}]))
                .with_json(
                    "/historical-price-eod/light?symbol=SAP",
                    json!({"symbol": "SAP", "historical": [{"date": days_ago(3), "price": 251.2}]}),
                )
                .with_json("/acquisition-of-beneficial-ownership?symbol=SAP", json!([])),
        );
        let fmp = scripted_client(&fetcher);

        let data = fmp.load_company_data("sap").await.unwrap();

        assert_eq!(data.company_name, "SAP");
        assert_eq!(data.price_data.historical.len(), 1);
        assert_eq!(data.basic_stats.price, Some(251.2));
        assert_eq!(data.basic_stats.currency, "USD");
        assert_eq!(data.basic_stats.market_cap, None);
    }

    #[tokio::test]
    async fn test_serialized_shape() {
        let fetcher = Arc::new(apple_fetcher());
        let fmp = scripted_client(&fetcher);

        let data = fmp.load_company_data("AAPL").await.unwrap();
        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["symbol"], json!("AAPL"));
        assert_eq!(value["companyName"], json!("Apple Inc."));
        assert!(value["priceData"]["historical"].is_array());
        assert_eq!(value["priceData"]["historical"][0]["close"], json!(100.0));
        assert_eq!(value["ownershipData"], json!([]));
        assert_eq!(value["basicStats"]["currency"], json!("USD"));
    }
}
