//! CoinGecko simple-price endpoint

use crate::api::http::build_url;
use crate::error::{Result, StockError};
use serde_json::Value;

/// URL for the USD price of a single coin
pub fn simple_price_url(base_url: &str, id: &str) -> Result<String> {
    let endpoint = format!("{}/simple/price", base_url.trim_end_matches('/'));
    build_url(&endpoint, &[("ids", id), ("vs_currencies", "usd")])
}

/// Pull the USD price for `id` out of a simple-price response.
///
/// Returns `Ok(None)` when the id is not a key of the response object, which
/// is how CoinGecko reports an unknown coin.
pub fn usd_price(body: &Value, id: &str) -> Result<Option<f64>> {
    if let Some(message) = body
        .get("status")
        .and_then(|s| s.get("error_message"))
        .and_then(Value::as_str)
    {
        return Err(StockError::ApiError(message.to_string()));
    }

    let Some(entry) = body.get(id) else {
        return Ok(None);
    };

    entry
        .get("usd")
        .and_then(Value::as_f64)
        .map(Some)
        .ok_or_else(|| StockError::ApiError(format!("no USD price in response for '{id}'")))
}
