//! Yahoo Finance API client

use crate::error::{Result, StockError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use yahoo_finance_api as yahoo;

/// History periods understood by the Yahoo chart endpoint
pub const VALID_PERIODS: [&str; 11] = [
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// Daily price bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

/// Source of daily price history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Daily bars for `symbol` over `period`, oldest first.
    ///
    /// An unknown symbol may yield an empty series rather than an error.
    async fn daily_history(&self, symbol: &str, period: &str) -> Result<Vec<Quote>>;
}

/// Check a period string against [`VALID_PERIODS`]
pub fn validate_period(period: &str) -> Result<()> {
    if VALID_PERIODS.contains(&period) {
        Ok(())
    } else {
        Err(StockError::InvalidPeriod(format!(
            "{period} (expected one of {})",
            VALID_PERIODS.join(", ")
        )))
    }
}

/// Bars from a chart response.
///
/// Yahoo answers an unknown or delisted symbol with an empty result, a
/// block without timestamps or a `Not Found` chart error. All three mean
/// "no bars" here so callers can report missing data for the symbol.
fn chart_quotes(
    response: std::result::Result<yahoo::YResponse, yahoo::YahooError>,
) -> Result<Vec<yahoo::Quote>> {
    match response.and_then(|r| r.quotes()) {
        Ok(quotes) => Ok(quotes),
        Err(yahoo::YahooError::NoResult | yahoo::YahooError::NoQuotes) => Ok(Vec::new()),
        Err(yahoo::YahooError::ApiError(msg)) if msg.code.as_deref() == Some("Not Found") => {
            Ok(Vec::new())
        }
        Err(e) => Err(StockError::YahooFinanceError(e.to_string())),
    }
}

/// Run `fut`, failing with [`StockError::Timeout`] once `timeout` elapses
async fn with_timeout<T>(timeout: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| StockError::Timeout(timeout))?
}

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    timeout: Duration,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client whose calls fail after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn fetch_range(&self, symbol: &str, period: &str) -> Result<Vec<Quote>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        let quotes = chart_quotes(provider.get_quote_range(symbol, "1d", period).await)?;
        if quotes.is_empty() {
            tracing::debug!(symbol, period, "Yahoo Finance returned no bars");
        }

        Ok(quotes
            .iter()
            .map(|q| Quote {
                symbol: symbol.to_string(),
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
                adjclose: q.adjclose,
            })
            .collect())
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl MarketData for YahooFinanceClient {
    async fn daily_history(&self, symbol: &str, period: &str) -> Result<Vec<Quote>> {
        validate_period(period)?;

        tracing::debug!(symbol, period, "Requesting Yahoo Finance history");
        with_timeout(self.timeout, self.fetch_range(symbol, period)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(code: &str) -> yahoo::YahooError {
        yahoo::YahooError::ApiError(
            serde_json::from_value(json!({
                "code": code,
                "description": "No data found, symbol may be delisted"
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_chart_without_result_is_empty() {
        let response = yahoo::YResponse::from_json(json!({
            "chart": { "result": null, "error": null }
        }));
        assert!(chart_quotes(response).unwrap().is_empty());
    }

    #[test]
    fn test_chart_not_found_error_is_empty() {
        let response = yahoo::YResponse::from_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        }));
        assert!(chart_quotes(response).unwrap().is_empty());

        assert!(chart_quotes(Err(api_error("Not Found"))).unwrap().is_empty());
        assert!(chart_quotes(Err(yahoo::YahooError::NoQuotes)).unwrap().is_empty());
        assert!(chart_quotes(Err(yahoo::YahooError::NoResult)).unwrap().is_empty());
    }

    #[test]
    fn test_chart_other_errors_propagate() {
        let err = chart_quotes(Err(api_error("Bad Request"))).unwrap_err();
        assert!(matches!(err, StockError::YahooFinanceError(_)));

        let err = chart_quotes(Err(yahoo::YahooError::DataInconsistency)).unwrap_err();
        assert!(matches!(err, StockError::YahooFinanceError(_)));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(1)
        };
        let result = with_timeout(Duration::from_millis(10), slow).await;
        assert!(matches!(result, Err(StockError::Timeout(d)) if d == Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_result() {
        let result = with_timeout(Duration::from_secs(1), async { Ok("done") }).await;
        assert_eq!(result.unwrap(), "done");
    }

    #[test]
    fn test_validate_period() {
        assert!(validate_period("1mo").is_ok());
        assert!(validate_period("ytd").is_ok());

        let err = validate_period("7x").unwrap_err();
        assert!(matches!(err, StockError::InvalidPeriod(_)));
        assert!(err.to_string().starts_with("Invalid period: 7x"));
    }

    #[tokio::test]
    async fn test_invalid_period_skips_network() {
        let client = YahooFinanceClient::new(Duration::from_millis(1));
        let result = client.daily_history("AAPL", "forever").await;
        assert!(matches!(result, Err(StockError::InvalidPeriod(_))));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_daily_history() {
        let client = YahooFinanceClient::default();
        let quotes = client.daily_history("AAPL", "1mo").await.unwrap();
        assert!(!quotes.is_empty());
        assert_eq!(quotes[0].symbol, "AAPL");
        assert!(quotes.last().unwrap().close > 0.0);
    }
}
