//! Stock, crypto and market-news lookups behind an interactive prompt
//!
//! This crate provides:
//!
//! - Latest stock prices and daily history from Yahoo Finance
//! - USD cryptocurrency prices from CoinGecko
//! - News headlines from the Alpha Vantage news-sentiment feed
//! - Simple moving averages over recent closing prices
//! - A line-oriented command dispatcher and read-eval-print loop
//!
//! # Architecture
//!
//! Network access goes through two injectable traits, [`api::MarketData`]
//! and [`api::HttpFetch`]. The fetchers in [`fetchers`] turn a symbol into a
//! typed result or a [`StockError`], [`format`] renders either one as text,
//! and [`bot::StockBot`] ties parsing, dispatch and printing together.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockbot::{BotConfig, StockBot, StockConfig};
//! use stockbot::secrets::{EnvSecrets, load_dotenv};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     load_dotenv(None)?;
//!     let config = BotConfig::builder()
//!         .stock_config(StockConfig::builder().with_secrets(&EnvSecrets).build()?)
//!         .build();
//!
//!     let bot = StockBot::from_config(config)?;
//!     println!("{:?}", bot.process_input("stock AAPL").await);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod format;
pub mod secrets;

// Re-export main types for convenience
pub use bot::{BotConfig, Reply, ReplState, StockBot};
pub use commands::Command;
pub use config::StockConfig;
pub use error::{ErrorKind, Result, StockError};
pub use fetchers::{MovingAverage, NewsItem, PriceResult};
