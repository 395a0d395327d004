//! Latest stock price

use crate::api::MarketData;
use crate::error::{Result, StockError};
use crate::fetchers::PriceResult;
use std::sync::Arc;

/// Fetches the latest close for a ticker
#[derive(Clone)]
pub struct StockPriceFetcher {
    market: Arc<dyn MarketData>,
}

impl StockPriceFetcher {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }

    /// Latest closing price from the most recent trading day
    pub async fn price(&self, symbol: &str) -> Result<PriceResult> {
        let symbol = symbol.to_uppercase();

        let quotes = self
            .market
            .daily_history(&symbol, "1d")
            .await
            .map_err(|e| {
                tracing::warn!(symbol = %symbol, error = %e, "Stock price fetch failed");
                StockError::fetch(format!("fetching {symbol}"), e)
            })?;

        let close = quotes
            .last()
            .map(|q| q.close)
            .filter(|close| close.is_finite())
            .ok_or_else(|| StockError::NoStockData(symbol.clone()))?;

        Ok(PriceResult {
            label: symbol,
            price: close,
        })
    }
}
