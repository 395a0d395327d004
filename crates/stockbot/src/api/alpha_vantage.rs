//! Alpha Vantage news-sentiment client

use crate::api::http::{HttpFetch, build_url};
use crate::error::{Result, StockError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Timestamp format expected by `time_from` / `time_to`
pub const NEWS_TIME_FORMAT: &str = "%Y%m%dT%H%M";

/// Article in a news-sentiment feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub time_published: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// NEWS_SENTIMENT response body
///
/// On failure Alpha Vantage answers 200 with one of the message fields set
/// and no `feed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsSentimentResponse {
    #[serde(default)]
    pub feed: Option<Vec<NewsArticle>>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
}

impl NewsSentimentResponse {
    /// First provider message present, in order Note, Information, Error Message
    pub fn provider_message(&self) -> Option<&str> {
        self.note
            .as_deref()
            .or(self.information.as_deref())
            .or(self.error_message.as_deref())
    }
}

/// `(time_from, time_to)` covering `days` days before `now`
pub fn lookback_window(now: DateTime<Utc>, days: i64) -> (String, String) {
    let from = now - Duration::days(days);
    (
        from.format(NEWS_TIME_FORMAT).to_string(),
        now.format(NEWS_TIME_FORMAT).to_string(),
    )
}

/// Alpha Vantage API client
#[derive(Clone)]
pub struct AlphaVantageClient {
    http: Arc<dyn HttpFetch>,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client with API key
    ///
    /// # Arguments
    /// * `http` - fetch capability used for requests; rate limiting belongs
    ///   to this layer (see [`RateLimitedHttp`](crate::api::http::RateLimitedHttp))
    /// * `base_url` - query endpoint
    /// * `api_key` - Alpha Vantage API key
    pub fn new(
        http: Arc<dyn HttpFetch>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch news and sentiment for `symbol` published between the two timestamps
    pub async fn news_sentiment(
        &self,
        symbol: &str,
        time_from: &str,
        time_to: &str,
    ) -> Result<NewsSentimentResponse> {
        let url = build_url(
            &self.base_url,
            &[
                ("function", "NEWS_SENTIMENT"),
                ("tickers", symbol),
                ("time_from", time_from),
                ("time_to", time_to),
                ("apikey", self.api_key.as_str()),
            ],
        )?;

        tracing::debug!(
            url = %stockbot_utils::redact_secret(&url, Some(self.api_key.as_str())),
            "Requesting Alpha Vantage news"
        );

        let data = self.http.get_json(&url).await?;
        tracing::debug!(response = %data, "Alpha Vantage news response");

        if !data.is_object() {
            return Err(StockError::ApiError(
                "unexpected news response shape".to_string(),
            ));
        }

        Ok(serde_json::from_value(data)?)
    }
}

impl std::fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::MockHttpFetch;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_lookback_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 5, 0).unwrap();
        let (from, to) = lookback_window(now, 7);
        assert_eq!(from, "20240303T1405");
        assert_eq!(to, "20240310T1405");
    }

    #[test]
    fn test_provider_message_order() {
        let response: NewsSentimentResponse = serde_json::from_value(json!({
            "Information": "premium endpoint",
            "Note": "rate limit"
        }))
        .unwrap();
        assert!(response.feed.is_none());
        assert_eq!(response.provider_message(), Some("rate limit"));

        let response = NewsSentimentResponse::default();
        assert_eq!(response.provider_message(), None);
    }

    #[tokio::test]
    async fn test_news_sentiment_request() {
        let mut http = MockHttpFetch::new();
        http.expect_get_json()
            .withf(|url| {
                url.starts_with("https://av.test/query?function=NEWS_SENTIMENT")
                    && url.contains("tickers=AAPL")
                    && url.contains("time_from=20240303T1405")
                    && url.contains("apikey=secret")
            })
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "items": "1",
                    "feed": [{"title": "Apple ships", "url": "https://news.test/1", "source": "Wire"}]
                }))
            });

        let client = AlphaVantageClient::new(Arc::new(http), "https://av.test/query", "secret");
        let response = client
            .news_sentiment("AAPL", "20240303T1405", "20240310T1405")
            .await
            .unwrap();

        let feed = response.feed.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].title, "Apple ships");
        assert_eq!(feed[0].source.as_deref(), Some("Wire"));
    }

    #[test]
    fn test_debug_hides_key() {
        let client = AlphaVantageClient::new(
            Arc::new(MockHttpFetch::new()),
            "https://av.test/query",
            "secret",
        );
        assert!(!format!("{client:?}").contains("secret"));
    }
}
