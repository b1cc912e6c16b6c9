//! Display statistics derived from the price series and the profile.

use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::prices::PricePoint;
use super::profile::CompanyProfile;

const DEFAULT_CURRENCY: &str = "USD";

/// Read-only snapshot computed once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicStats {
    pub price: Option<f64>,
    pub currency: String,
    pub latest_close: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub market_cap: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub free_float: Option<f64>,
    pub avg_trading_volume: Option<f64>,
}

/// Aggregates statistics with the trailing window ending today (UTC).
pub fn aggregate(series: &[PricePoint], profile: &CompanyProfile) -> BasicStats {
    aggregate_as_of(series, profile, Utc::now().date_naive())
}

/// Aggregates statistics with the trailing window ending at `as_of`.
///
/// The 52-week range covers points dated on or after `as_of` minus twelve months. When
/// no point falls in that window the whole series is used instead.
pub fn aggregate_as_of(
    series: &[PricePoint],
    profile: &CompanyProfile,
    as_of: NaiveDate,
) -> BasicStats {
    let latest_close = latest_close(series).or_else(|| profile.price());

    let cutoff = as_of.checked_sub_months(Months::new(12)).unwrap_or(NaiveDate::MIN);
    let trailing: Vec<f64> = series
        .iter()
        .filter(|point| point.date >= cutoff)
        .map(|point| point.close)
        .collect();
    let window = if trailing.is_empty() {
        series.iter().map(|point| point.close).collect()
    } else {
        trailing
    };

    BasicStats {
        price: profile.price().or(latest_close),
        currency: profile
            .currency()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        latest_close,
        fifty_two_week_low: window.iter().copied().reduce(f64::min),
        fifty_two_week_high: window.iter().copied().reduce(f64::max),
        market_cap: profile.market_cap(),
        shares_outstanding: profile.shares_outstanding(),
        free_float: profile.free_float(),
        avg_trading_volume: profile.avg_trading_volume(),
    }
}

/// Close of the most recent point.
fn latest_close(series: &[PricePoint]) -> Option<f64> {
    series
        .iter()
        .enumerate()
        // Earliest index wins among equal dates, matching a stable descending sort.
        .max_by(|(ia, a), (ib, b)| a.date.cmp(&b.date).then(ib.cmp(ia)))
        .map(|(_, point)| point.close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(date: NaiveDate, close: f64) -> PricePoint {
        PricePoint { date, close }
    }

    #[test]
    fn test_range_within_trailing_year() {
        let as_of = day(2025, 6, 30);
        let series = vec![
            point(day(2025, 6, 27), 100.0),
            point(day(2025, 3, 3), 150.0),
            point(day(2024, 12, 2), 80.0),
        ];
        let stats = aggregate_as_of(&series, &CompanyProfile::default(), as_of);
        assert_eq!(stats.fifty_two_week_low, Some(80.0));
        assert_eq!(stats.fifty_two_week_high, Some(150.0));
        assert_eq!(stats.latest_close, Some(100.0));
        assert_eq!(stats.price, Some(100.0));
        assert_eq!(stats.currency, "USD");
    }

    #[test]
    fn test_points_outside_window_are_ignored() {
        let as_of = day(2025, 6, 30);
        let series = vec![
            point(day(2023, 1, 3), 500.0),
            point(day(2025, 1, 3), 120.0),
            point(day(2024, 6, 30), 90.0),
            point(day(2024, 6, 28), 10.0),
        ];
        let stats = aggregate_as_of(&series, &CompanyProfile::default(), as_of);
        assert_eq!(stats.fifty_two_week_low, Some(90.0));
        assert_eq!(stats.fifty_two_week_high, Some(120.0));
        assert_eq!(stats.latest_close, Some(120.0));
    }

    #[test]
    fn test_stale_series_uses_everything() {
        let series = vec![point(day(2020, 1, 2), 30.0), point(day(2020, 1, 3), 40.0)];
        let stats = aggregate_as_of(&series, &CompanyProfile::default(), day(2025, 6, 30));
        assert_eq!(stats.fifty_two_week_low, Some(30.0));
        assert_eq!(stats.fifty_two_week_high, Some(40.0));
        assert_eq!(stats.latest_close, Some(40.0));
    }

    #[test]
    fn test_empty_series_falls_back_to_profile() {
        let profile = CompanyProfile::from_response(json!([{
            "price": 187.5,
            "currency": "EUR",
            "marketCap": 2.1e11,
            "sharesOutstanding": 1.1e9,
            "floatShares": 9.0e8,
            "averageVolume": 3400000
        }]));
        let stats = aggregate_as_of(&[], &profile, day(2025, 6, 30));
        assert_eq!(stats.latest_close, Some(187.5));
        assert_eq!(stats.price, Some(187.5));
        assert_eq!(stats.currency, "EUR");
        assert_eq!(stats.fifty_two_week_low, None);
        assert_eq!(stats.fifty_two_week_high, None);
        assert_eq!(stats.market_cap, Some(2.1e11));
        assert_eq!(stats.shares_outstanding, Some(1.1e9));
        assert_eq!(stats.free_float, Some(9.0e8));
        assert_eq!(stats.avg_trading_volume, Some(3_400_000.0));
    }

    #[test]
    fn test_nothing_available() {
        let stats = aggregate_as_of(&[], &CompanyProfile::default(), day(2025, 6, 30));
        assert_eq!(stats.price, None);
        assert_eq!(stats.latest_close, None);
        assert_eq!(stats.market_cap, None);
    }

    #[test]
    fn test_profile_price_preferred_over_latest_close() {
        let profile = CompanyProfile::from_response(json!({"price": 201.0}));
        let series = vec![point(day(2025, 6, 27), 199.0)];
        let stats = aggregate_as_of(&series, &profile, day(2025, 6, 30));
        assert_eq!(stats.price, Some(201.0));
        assert_eq!(stats.latest_close, Some(199.0));
    }

    #[test]
    fn test_equal_dates_take_first_listed() {
        let series = vec![point(day(2025, 6, 27), 1.0), point(day(2025, 6, 27), 2.0)];
        assert_eq!(latest_close(&series), Some(1.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let stats = aggregate_as_of(&[], &CompanyProfile::default(), day(2025, 6, 30));
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["fiftyTwoWeekLow"], json!(null));
        assert_eq!(value["currency"], json!("USD"));
    }
}
