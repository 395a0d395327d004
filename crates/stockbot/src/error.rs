//! Error types for stockbot operations
//!
//! The `Display` output of every variant is the exact line shown to the user,
//! so a fetcher failure can be printed wherever its result would have been.

use std::time::Duration;
use thiserror::Error;

/// Broad category of a [`StockError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The provider returned nothing usable for a valid-looking request
    NoData,
    /// The provider does not recognise the identifier
    InvalidId,
    /// Network, timeout, parsing or provider-side failure
    Transport,
    /// The command line could not be turned into a command
    Usage,
}

/// Stockbot specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// No price data for a stock symbol
    #[error("Error: No stock data available for {0}.")]
    NoStockData(String),

    /// No historical series for a stock symbol
    #[error("Error: No historical data available for {0}.")]
    NoHistoricalData(String),

    /// Fewer samples than the moving-average window
    #[error(
        "Error: Insufficient data for {symbol} {window}-Day Moving Average (only {available} samples)."
    )]
    InsufficientData {
        symbol: String,
        window: usize,
        available: usize,
    },

    /// Coin id not present in the price response
    #[error("Error: Invalid cryptocurrency ID '{0}'.")]
    InvalidCryptoId(String),

    /// A lower-level failure wrapped at a fetcher boundary
    #[error("Error {context}: {reason}")]
    Fetch { context: String, reason: String },

    /// News provider failure or missing feed
    #[error("Error fetching news: {0}")]
    News(String),

    /// Provider answered with a non-success status
    #[error("API error: {0}")]
    ApiError(String),

    /// Invalid history period
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Outbound call exceeded the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed command argument
    #[error("Usage: {0}")]
    Usage(String),

    /// Unrecognised command verb
    #[error("Invalid command: \"{0}\", Please type 'help' to see available commands.")]
    InvalidCommand(String),
}

impl StockError {
    /// Wrap any failure with a human-readable context such as `fetching AAPL`
    pub fn fetch(context: impl Into<String>, reason: impl ToString) -> Self {
        StockError::Fetch {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockError::NoStockData(_)
            | StockError::NoHistoricalData(_)
            | StockError::InsufficientData { .. } => ErrorKind::NoData,
            StockError::InvalidCryptoId(_) => ErrorKind::InvalidId,
            StockError::Usage(_) | StockError::InvalidCommand(_) => ErrorKind::Usage,
            StockError::Fetch { .. }
            | StockError::News(_)
            | StockError::ApiError(_)
            | StockError::InvalidPeriod(_)
            | StockError::NetworkError(_)
            | StockError::JsonError(_)
            | StockError::YahooFinanceError(_)
            | StockError::Timeout(_)
            | StockError::ConfigError(_)
            | StockError::Io(_) => ErrorKind::Transport,
        }
    }
}

/// Result type alias for stockbot operations
pub type Result<T> = std::result::Result<T, StockError>;
