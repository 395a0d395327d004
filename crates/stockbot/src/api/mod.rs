//! API clients for market data providers

pub mod alpha_vantage;
pub mod coingecko;
pub mod http;
pub mod yahoo;

pub use alpha_vantage::{AlphaVantageClient, NewsArticle, NewsSentimentResponse};
pub use http::{HttpFetch, RateLimitedHttp, ReqwestFetcher};
pub use yahoo::{MarketData, Quote, YahooFinanceClient};
