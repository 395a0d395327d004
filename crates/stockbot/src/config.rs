//! Configuration for stockbot operations

use crate::api::yahoo::VALID_PERIODS;
use crate::error::{Result, StockError};
use crate::secrets::SecretSource;
use std::fmt;
use std::time::Duration;

/// Environment variables checked for the Alpha Vantage key, in order
pub const ALPHA_VANTAGE_KEY_VARS: [&str; 2] = ["ALPHA_VANTAGE_API_KEY", "ALPHA_VANTAGE_KEY"];

/// Upper bound on headlines returned per news query
pub const MAX_NEWS_ITEMS: usize = 3;

pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Configuration for stockbot operations
#[derive(Clone)]
pub struct StockConfig {
    /// Timeout applied to every outbound call
    pub request_timeout: Duration,

    /// Whether crypto and news responses are cached
    pub cache_enabled: bool,

    /// Cache TTL for real-time data (crypto quotes)
    pub cache_ttl_realtime: Duration,

    /// Cache TTL for news data
    pub cache_ttl_news: Duration,

    /// Days of news to look back over
    pub news_lookback_days: i64,

    /// Number of headlines to show (at most [`MAX_NEWS_ITEMS`])
    pub news_limit: usize,

    /// Alpha Vantage requests allowed per minute
    pub alpha_vantage_rate_limit: u32,

    /// Alpha Vantage API key (optional)
    pub alpha_vantage_api_key: Option<String>,

    /// CoinGecko API base URL
    pub coingecko_base_url: String,

    /// Alpha Vantage query endpoint
    pub alpha_vantage_base_url: String,

    /// Period used by `history` when none is given
    pub default_history_period: String,

    /// Window used by `ma` when none is given
    pub default_ma_window: usize,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cache_enabled: true,
            cache_ttl_realtime: Duration::from_secs(60), // 1 minute
            cache_ttl_news: Duration::from_secs(300),    // 5 minutes
            news_lookback_days: 7,
            news_limit: MAX_NEWS_ITEMS,
            alpha_vantage_rate_limit: 5, // free tier
            alpha_vantage_api_key: None,
            coingecko_base_url: COINGECKO_BASE_URL.to_string(),
            alpha_vantage_base_url: ALPHA_VANTAGE_BASE_URL.to_string(),
            default_history_period: "1mo".to_string(),
            default_ma_window: 20,
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.news_limit == 0 || self.news_limit > MAX_NEWS_ITEMS {
            return Err(StockError::ConfigError(format!(
                "news_limit must be between 1 and {MAX_NEWS_ITEMS}"
            )));
        }

        if self.news_lookback_days <= 0 {
            return Err(StockError::ConfigError(
                "news_lookback_days must be greater than 0".to_string(),
            ));
        }

        if self.alpha_vantage_rate_limit == 0 {
            return Err(StockError::ConfigError(
                "alpha_vantage_rate_limit must be greater than 0".to_string(),
            ));
        }

        if self.default_ma_window == 0 {
            return Err(StockError::ConfigError(
                "default_ma_window must be greater than 0".to_string(),
            ));
        }

        if !VALID_PERIODS.contains(&self.default_history_period.as_str()) {
            return Err(StockError::ConfigError(format!(
                "default_history_period must be one of {}",
                VALID_PERIODS.join(", ")
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for StockConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StockConfig")
            .field("request_timeout", &self.request_timeout)
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_ttl_realtime", &self.cache_ttl_realtime)
            .field("cache_ttl_news", &self.cache_ttl_news)
            .field("news_lookback_days", &self.news_lookback_days)
            .field("news_limit", &self.news_limit)
            .field("alpha_vantage_rate_limit", &self.alpha_vantage_rate_limit)
            .field(
                "alpha_vantage_api_key",
                &self.alpha_vantage_api_key.as_ref().map(|_| "***"),
            )
            .field("coingecko_base_url", &self.coingecko_base_url)
            .field("alpha_vantage_base_url", &self.alpha_vantage_base_url)
            .field("default_history_period", &self.default_history_period)
            .field("default_ma_window", &self.default_ma_window)
            .finish()
    }
}

/// Builder for StockConfig
#[derive(Default)]
pub struct StockConfigBuilder {
    request_timeout: Option<Duration>,
    cache_enabled: Option<bool>,
    cache_ttl_realtime: Option<Duration>,
    cache_ttl_news: Option<Duration>,
    news_lookback_days: Option<i64>,
    news_limit: Option<usize>,
    alpha_vantage_rate_limit: Option<u32>,
    alpha_vantage_api_key: Option<String>,
    coingecko_base_url: Option<String>,
    alpha_vantage_base_url: Option<String>,
    default_history_period: Option<String>,
    default_ma_window: Option<usize>,
}

impl StockConfigBuilder {
    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Enable or disable response caching
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    /// Set cache TTL for real-time data
    pub fn cache_ttl_realtime(mut self, duration: Duration) -> Self {
        self.cache_ttl_realtime = Some(duration);
        self
    }

    /// Set cache TTL for news data
    pub fn cache_ttl_news(mut self, duration: Duration) -> Self {
        self.cache_ttl_news = Some(duration);
        self
    }

    /// Set news lookback window in days
    pub fn news_lookback_days(mut self, days: i64) -> Self {
        self.news_lookback_days = Some(days);
        self
    }

    /// Set number of headlines per query
    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Set Alpha Vantage requests per minute
    pub fn alpha_vantage_rate_limit(mut self, per_minute: u32) -> Self {
        self.alpha_vantage_rate_limit = Some(per_minute);
        self
    }

    /// Set Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set CoinGecko base URL
    pub fn coingecko_base_url(mut self, url: impl Into<String>) -> Self {
        self.coingecko_base_url = Some(url.into());
        self
    }

    /// Set Alpha Vantage endpoint
    pub fn alpha_vantage_base_url(mut self, url: impl Into<String>) -> Self {
        self.alpha_vantage_base_url = Some(url.into());
        self
    }

    /// Set default history period
    pub fn default_history_period(mut self, period: impl Into<String>) -> Self {
        self.default_history_period = Some(period.into());
        self
    }

    /// Set default moving-average window
    pub fn default_ma_window(mut self, window: usize) -> Self {
        self.default_ma_window = Some(window);
        self
    }

    /// Load the Alpha Vantage API key from a secret source
    pub fn with_secrets(mut self, secrets: &dyn SecretSource) -> Self {
        if let Some(key) = secrets.first_of(&ALPHA_VANTAGE_KEY_VARS) {
            self.alpha_vantage_api_key = Some(key);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            cache_enabled: self.cache_enabled.unwrap_or(defaults.cache_enabled),
            cache_ttl_realtime: self.cache_ttl_realtime.unwrap_or(defaults.cache_ttl_realtime),
            cache_ttl_news: self.cache_ttl_news.unwrap_or(defaults.cache_ttl_news),
            news_lookback_days: self.news_lookback_days.unwrap_or(defaults.news_lookback_days),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            alpha_vantage_rate_limit: self
                .alpha_vantage_rate_limit
                .unwrap_or(defaults.alpha_vantage_rate_limit),
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            coingecko_base_url: self.coingecko_base_url.unwrap_or(defaults.coingecko_base_url),
            alpha_vantage_base_url: self
                .alpha_vantage_base_url
                .unwrap_or(defaults.alpha_vantage_base_url),
            default_history_period: self
                .default_history_period
                .unwrap_or(defaults.default_history_period),
            default_ma_window: self.default_ma_window.unwrap_or(defaults.default_ma_window),
        };

        config.validate()?;
        Ok(config)
    }
}
