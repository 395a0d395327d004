//! JSON-over-HTTP fetch capability

use crate::error::{Result, StockError};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client, Url};
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Fetches a URL and parses the body as JSON
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET `url` and return the decoded JSON body
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// Append percent-encoded query parameters to `base`
pub fn build_url(base: &str, params: &[(&str, &str)]) -> Result<String> {
    Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| StockError::ConfigError(format!("Invalid URL {base}: {e}")))
}

/// [`HttpFetch`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout: Duration,
}

impl ReqwestFetcher {
    /// Create a fetcher whose requests fail after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stockbot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }

    fn map_send_error(&self, err: reqwest::Error) -> StockError {
        if err.is_timeout() {
            StockError::Timeout(self.timeout)
        } else {
            StockError::NetworkError(err)
        }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::ApiError(format!("HTTP {status}: {body}")));
        }

        let text = response.text().await.map_err(|e| self.map_send_error(e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// [`HttpFetch`] decorator that holds each request until a per-minute quota allows it
///
/// Stack it below any cache so cache hits never wait on the quota.
pub struct RateLimitedHttp {
    inner: Arc<dyn HttpFetch>,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl RateLimitedHttp {
    /// Allow `per_minute` requests through to `inner`; zero is treated as one
    pub fn new(inner: Arc<dyn HttpFetch>, per_minute: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN));
        Self {
            inner,
            limiter: RateLimiter::direct(quota),
        }
    }
}

#[async_trait]
impl HttpFetch for RateLimitedHttp {
    async fn get_json(&self, url: &str) -> Result<Value> {
        // Wait for rate limiter
        self.limiter.until_ready().await;
        self.inner.get_json(url).await
    }
}
