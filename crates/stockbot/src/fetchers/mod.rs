//! Fetchers: one per command, each turning a symbol or id into a typed
//! result or a [`StockError`](crate::error::StockError)

pub mod crypto_price;
pub mod history;
pub mod news;
pub mod stock_price;

pub use crypto_price::CryptoPriceFetcher;
pub use history::{HistoryFetcher, MOVING_AVERAGE_PERIOD};
pub use news::NewsFetcher;
pub use stock_price::StockPriceFetcher;

use serde::{Deserialize, Serialize};

/// Latest price of a stock or coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Display label, e.g. `AAPL` or `Bitcoin`
    pub label: String,
    pub price: f64,
}

/// Headline and link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Entry shown when the provider returned an empty feed
    pub fn placeholder() -> Self {
        Self::new("No recent news found.", "")
    }
}

/// Most recent simple moving average of closing prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverage {
    pub symbol: String,
    pub window: usize,
    pub value: f64,
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::Quote;
    use chrono::{DateTime, Duration, Utc};

    /// Daily bars with the given closes, one day apart, oldest first
    pub fn quotes(symbol: &str, closes: &[f64]) -> Vec<Quote> {
        let start = DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_else(Utc::now);
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Quote {
                symbol: symbol.to_string(),
                timestamp: start + Duration::days(i as i64),
                open: close - 1.0,
                high: close + 1.0,
                low: close - 2.0,
                close,
                volume: 1_000 + i as u64,
                adjclose: close,
            })
            .collect()
    }
}
