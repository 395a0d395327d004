//! Recent news headlines for a ticker

use crate::api::alpha_vantage::{AlphaVantageClient, lookback_window};
use crate::api::HttpFetch;
use crate::config::{MAX_NEWS_ITEMS, StockConfig};
use crate::error::{Result, StockError};
use crate::fetchers::NewsItem;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Fetches up to three headlines from the Alpha Vantage news-sentiment feed
#[derive(Debug, Clone)]
pub struct NewsFetcher {
    client: Option<AlphaVantageClient>,
    lookback_days: i64,
    limit: usize,
}

impl NewsFetcher {
    /// Without an API key in `config` every lookup fails without a request.
    ///
    /// `http` is used as given; callers stack caching and rate limiting on it.
    pub fn new(http: Arc<dyn HttpFetch>, config: &StockConfig) -> Self {
        let client = config.alpha_vantage_api_key.as_ref().map(|key| {
            AlphaVantageClient::new(
                http,
                config.alpha_vantage_base_url.clone(),
                key.clone(),
            )
        });

        Self {
            client,
            lookback_days: config.news_lookback_days,
            limit: config.news_limit.min(MAX_NEWS_ITEMS),
        }
    }

    /// Headlines published during the lookback window ending now
    pub async fn headlines(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        self.headlines_at(symbol, Utc::now()).await
    }

    /// Headlines published during the lookback window ending at `now`
    pub async fn headlines_at(&self, symbol: &str, now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        let symbol = symbol.to_uppercase();

        let client = self.client.as_ref().ok_or_else(|| {
            StockError::News(
                "Alpha Vantage API key not configured (set ALPHA_VANTAGE_API_KEY)".to_string(),
            )
        })?;

        let (time_from, time_to) = lookback_window(now, self.lookback_days);
        let response = client
            .news_sentiment(&symbol, &time_from, &time_to)
            .await
            .map_err(|e| {
                tracing::warn!(symbol = %symbol, error = %e, "News fetch failed");
                StockError::News(e.to_string())
            })?;

        let Some(feed) = &response.feed else {
            let message = response.provider_message().unwrap_or("Unknown error");
            return Err(StockError::News(message.to_string()));
        };

        let items: Vec<NewsItem> = feed
            .iter()
            .take(self.limit)
            .map(|article| NewsItem::new(&article.title, &article.url))
            .collect();

        if items.is_empty() {
            Ok(vec![NewsItem::placeholder()])
        } else {
            Ok(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::MockHttpFetch;
    use chrono::TimeZone;
    use serde_json::json;

    fn config_with_key() -> StockConfig {
        StockConfig::builder()
            .alpha_vantage_api_key("test_key")
            .alpha_vantage_base_url("https://av.test/query")
            .build()
            .unwrap()
    }

    fn feed(count: usize) -> serde_json::Value {
        let articles: Vec<_> = (0..count)
            .map(|i| json!({"title": format!("Headline {i}"), "url": format!("https://news.test/{i}")}))
            .collect();
        json!({ "items": count.to_string(), "feed": articles })
    }

    #[tokio::test]
    async fn test_never_more_than_three() {
        let mut http = MockHttpFetch::new();
        http.expect_get_json().returning(|_| Ok(feed(10)));

        let fetcher = NewsFetcher::new(Arc::new(http), &config_with_key());
        let items = fetcher.headlines("aapl").await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0], NewsItem::new("Headline 0", "https://news.test/0"));
        assert_eq!(items[2].title, "Headline 2");
    }

    #[tokio::test]
    async fn test_request_uses_lookback_window() {
        let mut http = MockHttpFetch::new();
        http.expect_get_json()
            .withf(|url| {
                url.contains("tickers=TSLA")
                    && url.contains("time_from=20240224T0930")
                    && url.contains("time_to=20240302T0930")
                    && url.contains("apikey=test_key")
            })
            .times(1)
            .returning(|_| Ok(feed(1)));

        let fetcher = NewsFetcher::new(Arc::new(http), &config_with_key());
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap();
        let items = fetcher.headlines_at("tsla", now).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_feed_placeholder() {
        let mut http = MockHttpFetch::new();
        http.expect_get_json().returning(|_| Ok(feed(0)));

        let fetcher = NewsFetcher::new(Arc::new(http), &config_with_key());
        let items = fetcher.headlines("AAPL").await.unwrap();
        assert_eq!(items, vec![NewsItem::placeholder()]);
    }

    #[tokio::test]
    async fn test_missing_feed_carries_note() {
        let mut http = MockHttpFetch::new();
        http.expect_get_json()
            .returning(|_| Ok(json!({"Note": "API call frequency exceeded"})));

        let fetcher = NewsFetcher::new(Arc::new(http), &config_with_key());
        let err = fetcher.headlines("AAPL").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error fetching news: API call frequency exceeded"
        );
    }

    #[tokio::test]
    async fn test_missing_feed_without_note() {
        let mut http = MockHttpFetch::new();
        http.expect_get_json().returning(|_| Ok(json!({"items": "0"})));

        let fetcher = NewsFetcher::new(Arc::new(http), &config_with_key());
        let err = fetcher.headlines("AAPL").await.unwrap_err();
        assert_eq!(err.to_string(), "Error fetching news: Unknown error");
    }

    #[tokio::test]
    async fn test_missing_key_skips_request() {
        let mut http = MockHttpFetch::new();
        http.expect_get_json().never();

        let fetcher = NewsFetcher::new(Arc::new(http), &StockConfig::default());
        let err = fetcher.headlines("AAPL").await.unwrap_err();
        assert!(err.to_string().contains("API key not configured"));
    }

    #[tokio::test]
    async fn test_cached_repeat_skips_rate_limit() {
        use crate::api::RateLimitedHttp;
        use crate::cache::CachedHttp;
        use std::time::Duration;

        let mut http = MockHttpFetch::new();
        http.expect_get_json().times(1).returning(|_| Ok(feed(2)));

        // One request per minute: a second trip to the limiter would stall
        let limited = Arc::new(RateLimitedHttp::new(Arc::new(http), 1));
        let cached = CachedHttp::wrap(limited, Duration::from_secs(300), true);
        let fetcher = NewsFetcher::new(cached, &config_with_key());
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap();

        let both = async {
            let first = fetcher.headlines_at("AAPL", now).await.unwrap();
            let second = fetcher.headlines_at("AAPL", now).await.unwrap();
            (first, second)
        };
        let (first, second) = tokio::time::timeout(Duration::from_secs(3), both)
            .await
            .expect("cached lookup waited on the rate limiter");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_fault() {
        let mut http = MockHttpFetch::new();
        http.expect_get_json()
            .returning(|_| Err(StockError::ApiError("HTTP 500".to_string())));

        let fetcher = NewsFetcher::new(Arc::new(http), &config_with_key());
        let err = fetcher.headlines("AAPL").await.unwrap_err();
        assert_eq!(err.to_string(), "Error fetching news: API error: HTTP 500");
    }
}
