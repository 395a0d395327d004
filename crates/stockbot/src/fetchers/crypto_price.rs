//! Latest cryptocurrency price

use crate::api::HttpFetch;
use crate::api::coingecko::{simple_price_url, usd_price};
use crate::error::{Result, StockError};
use crate::fetchers::PriceResult;
use crate::format::capitalize;
use std::sync::Arc;

/// Fetches the USD price of a coin from CoinGecko
#[derive(Clone)]
pub struct CryptoPriceFetcher {
    http: Arc<dyn HttpFetch>,
    base_url: String,
}

impl CryptoPriceFetcher {
    pub fn new(http: Arc<dyn HttpFetch>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// USD price for a coin id such as `bitcoin`
    pub async fn price(&self, id: &str) -> Result<PriceResult> {
        let id = id.to_lowercase();
        let wrap = |e: StockError| {
            tracing::warn!(id = %id, error = %e, "Crypto price fetch failed");
            StockError::fetch(format!("fetching {id}"), e)
        };

        let url = simple_price_url(&self.base_url, &id).map_err(wrap)?;
        tracing::debug!(url = %url, "Requesting CoinGecko price");

        let body = self.http.get_json(&url).await.map_err(wrap)?;

        match usd_price(&body, &id).map_err(wrap)? {
            Some(price) => Ok(PriceResult {
                label: capitalize(&id),
                price,
            }),
            None => Err(StockError::InvalidCryptoId(id)),
        }
    }
}
