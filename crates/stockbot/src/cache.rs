//! Caching layer for provider responses to reduce API calls

use crate::api::http::HttpFetch;
use crate::error::Result;
use async_trait::async_trait;
use cached::{Cached, TimedCache};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// JSON responses keyed by request URL, each expiring after a fixed TTL
pub struct StockCache {
    cache: RwLock<TimedCache<String, Value>>,
}

impl StockCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: RwLock::new(TimedCache::with_lifespan(ttl)),
        }
    }

    /// Get a value from the cache
    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: String, value: Value) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Get or fetch a value using the provided fetcher function
    ///
    /// If the value exists in cache, it's returned immediately.
    /// Otherwise, the fetcher function is called and a successful result is cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetcher: F) -> std::result::Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<Value, E>>,
    {
        if let Some(value) = self.get(key).await {
            tracing::debug!("Cache hit");
            return Ok(value);
        }

        tracing::debug!("Cache miss");

        let value = fetcher().await?;
        self.insert(key.to_string(), value.clone()).await;

        Ok(value)
    }
}

/// [`HttpFetch`] decorator that serves repeated URLs from a [`StockCache`]
pub struct CachedHttp {
    inner: Arc<dyn HttpFetch>,
    cache: StockCache,
}

impl CachedHttp {
    pub fn new(inner: Arc<dyn HttpFetch>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: StockCache::new(ttl),
        }
    }

    /// Wrap `inner` in a cache when `enabled`, otherwise return it unchanged
    pub fn wrap(inner: Arc<dyn HttpFetch>, ttl: Duration, enabled: bool) -> Arc<dyn HttpFetch> {
        if enabled {
            Arc::new(Self::new(inner, ttl))
        } else {
            inner
        }
    }
}

#[async_trait]
impl HttpFetch for CachedHttp {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.cache
            .get_or_fetch(url, || self.inner.get_json(url))
            .await
    }
}
