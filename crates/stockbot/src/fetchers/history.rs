//! Historical daily bars and the moving average computed over them

use crate::api::MarketData;
use crate::api::Quote;
use crate::api::yahoo::validate_period;
use crate::error::{Result, StockError};
use crate::fetchers::MovingAverage;
use std::sync::Arc;
use ta::Next;
use ta::indicators::SimpleMovingAverage;

/// Period the moving average is computed over
pub const MOVING_AVERAGE_PERIOD: &str = "1mo";

/// Fetches daily history and derives a simple moving average from it
#[derive(Clone)]
pub struct HistoryFetcher {
    market: Arc<dyn MarketData>,
}

impl HistoryFetcher {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }

    /// Daily bars for `symbol` over `period`
    pub async fn history(&self, symbol: &str, period: &str) -> Result<Vec<Quote>> {
        let symbol = symbol.to_uppercase();
        let wrap = |e: StockError| {
            tracing::warn!(symbol = %symbol, error = %e, "History fetch failed");
            StockError::fetch(format!("fetching historical data for {symbol}"), e)
        };

        validate_period(period).map_err(wrap)?;
        let quotes = self
            .market
            .daily_history(&symbol, period)
            .await
            .map_err(wrap)?;

        if quotes.is_empty() {
            return Err(StockError::NoHistoricalData(symbol));
        }
        Ok(quotes)
    }

    /// Simple moving average of the last `window` closes over [`MOVING_AVERAGE_PERIOD`]
    pub async fn moving_average(&self, symbol: &str, window: usize) -> Result<MovingAverage> {
        let symbol = symbol.to_uppercase();
        let wrap = |e: StockError| {
            tracing::warn!(symbol = %symbol, error = %e, "Moving average failed");
            StockError::fetch(format!("calculating moving average for {symbol}"), e)
        };

        let mut sma = SimpleMovingAverage::new(window).map_err(|_| {
            StockError::fetch(
                format!("calculating moving average for {symbol}"),
                "window must be at least 1",
            )
        })?;

        let quotes = self
            .market
            .daily_history(&symbol, MOVING_AVERAGE_PERIOD)
            .await
            .map_err(wrap)?;

        if quotes.is_empty() {
            return Err(StockError::NoHistoricalData(symbol));
        }

        if quotes.len() < window {
            return Err(StockError::InsufficientData {
                symbol,
                window,
                available: quotes.len(),
            });
        }

        let value = quotes
            .iter()
            .map(|q| sma.next(q.close))
            .last()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                wrap(StockError::ApiError(
                    "closing prices contain missing values".to_string(),
                ))
            })?;

        Ok(MovingAverage {
            symbol,
            window,
            value,
        })
    }
}
