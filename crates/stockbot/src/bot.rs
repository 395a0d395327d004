//! Stockbot command dispatcher and read-eval-print loop
//!
//! # Example
//!
//! ```rust,ignore
//! use stockbot::bot::{BotConfig, StockBot};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bot = StockBot::from_config(BotConfig::default())?;
//!     let stdin = std::io::stdin();
//!     bot.run_repl(stdin.lock(), &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

use crate::api::{HttpFetch, MarketData, RateLimitedHttp, ReqwestFetcher, YahooFinanceClient};
use crate::cache::CachedHttp;
use crate::commands::Command;
use crate::config::StockConfig;
use crate::error::Result;
use crate::fetchers::{CryptoPriceFetcher, HistoryFetcher, NewsFetcher, StockPriceFetcher};
use crate::format;
use std::io::{BufRead, ErrorKind as IoErrorKind, Write};
use std::sync::Arc;

/// Configuration for the stock bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Stock analysis configuration
    pub stock_config: StockConfig,
    /// Welcome message
    pub welcome_message: String,
    /// Prompt prefix
    pub prompt: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            stock_config: StockConfig::default(),
            welcome_message: "StockBot - type 'help' to see available commands".to_string(),
            prompt: "StockBot -> ".to_string(),
        }
    }
}

impl BotConfig {
    /// Create a builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    stock_config: Option<StockConfig>,
    welcome_message: Option<String>,
    prompt: Option<String>,
}

impl BotConfigBuilder {
    /// Set stock config
    pub fn stock_config(mut self, config: StockConfig) -> Self {
        self.stock_config = Some(config);
        self
    }

    /// Set welcome message
    pub fn welcome_message(mut self, msg: impl Into<String>) -> Self {
        self.welcome_message = Some(msg.into());
        self
    }

    /// Set prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Build the config
    pub fn build(self) -> BotConfig {
        let defaults = BotConfig::default();
        BotConfig {
            stock_config: self.stock_config.unwrap_or(defaults.stock_config),
            welcome_message: self.welcome_message.unwrap_or(defaults.welcome_message),
            prompt: self.prompt.unwrap_or(defaults.prompt),
        }
    }
}

/// What the loop should do after one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading
    Output(String),
    /// Stop the loop
    Exit,
}

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    Running,
    Terminated,
}

/// Stock Bot
pub struct StockBot {
    stock: StockPriceFetcher,
    crypto: CryptoPriceFetcher,
    news: NewsFetcher,
    history: HistoryFetcher,
    config: BotConfig,
}

impl StockBot {
    /// Create a bot over the given capabilities
    pub fn new(config: BotConfig, market: Arc<dyn MarketData>, http: Arc<dyn HttpFetch>) -> Self {
        let stock_config = &config.stock_config;

        let crypto_http = CachedHttp::wrap(
            Arc::clone(&http),
            stock_config.cache_ttl_realtime,
            stock_config.cache_enabled,
        );
        // Cache above the quota so repeated lookups skip the limiter
        let news_http = CachedHttp::wrap(
            Arc::new(RateLimitedHttp::new(http, stock_config.alpha_vantage_rate_limit)),
            stock_config.cache_ttl_news,
            stock_config.cache_enabled,
        );

        Self {
            stock: StockPriceFetcher::new(Arc::clone(&market)),
            crypto: CryptoPriceFetcher::new(crypto_http, stock_config.coingecko_base_url.clone()),
            news: NewsFetcher::new(news_http, stock_config),
            history: HistoryFetcher::new(market),
            config,
        }
    }

    /// Create a bot backed by Yahoo Finance and a reqwest client
    pub fn from_config(config: BotConfig) -> Result<Self> {
        config.stock_config.validate()?;

        let timeout = config.stock_config.request_timeout;
        let market: Arc<dyn MarketData> = Arc::new(YahooFinanceClient::new(timeout));
        let http: Arc<dyn HttpFetch> = Arc::new(ReqwestFetcher::new(timeout)?);

        Ok(Self::new(config, market, http))
    }

    /// Get the welcome message
    pub fn welcome(&self) -> &str {
        &self.config.welcome_message
    }

    /// Get the prompt
    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    /// Process one line of user input.
    ///
    /// Parse failures become usage text; they never end the loop.
    pub async fn process_input(&self, input: &str) -> Reply {
        match Command::parse(input) {
            Ok(command) => self.execute_command(command).await,
            Err(e) => Reply::Output(e.to_string()),
        }
    }

    /// Execute a parsed command
    pub async fn execute_command(&self, command: Command) -> Reply {
        tracing::debug!(command = ?command, "Dispatching {}", command.description());

        let stock_config = &self.config.stock_config;
        let text = match command {
            Command::Stock { symbol } => {
                format::outcome(&self.stock.price(&symbol).await, format::price_line)
            }
            Command::Crypto { id } => {
                format::outcome(&self.crypto.price(&id).await, format::price_line)
            }
            Command::News { symbol } => {
                let items = self.news.headlines(&symbol).await;
                format::news_block(&symbol, &items)
            }
            Command::History { symbol, period } => {
                let period = period.unwrap_or_else(|| stock_config.default_history_period.clone());
                let result = self.history.history(&symbol, &period).await;
                format::outcome(&result, |quotes| {
                    format::history_table(&symbol, &period, quotes)
                })
            }
            Command::MovingAverage { symbol, window } => {
                let window = window.unwrap_or(stock_config.default_ma_window);
                format::outcome(
                    &self.history.moving_average(&symbol, window).await,
                    format::moving_average_line,
                )
            }
            Command::Help => Command::help_text().to_string(),
            Command::Exit => return Reply::Exit,
        };

        Reply::Output(text)
    }

    /// Run the read-eval-print loop until `exit` or end of input
    pub async fn run_repl<R, W>(&self, input: R, output: &mut W) -> Result<ReplState>
    where
        R: BufRead,
        W: Write,
    {
        let mut state = ReplState::Running;
        let mut lines = input.lines();

        while state == ReplState::Running {
            write!(output, "{}", self.prompt())?;
            output.flush()?;

            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) if e.kind() == IoErrorKind::InvalidData => {
                    tracing::warn!("Skipping unreadable input line: {}", e);
                    writeln!(output, "Error reading input: {e}")?;
                    continue;
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    // EOF
                    writeln!(output)?;
                    writeln!(output, "Goodbye!")?;
                    state = ReplState::Terminated;
                    continue;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.process_input(line).await {
                Reply::Output(text) => writeln!(output, "{text}")?,
                Reply::Exit => {
                    writeln!(output, "Goodbye!")?;
                    state = ReplState::Terminated;
                }
            }
        }

        Ok(state)
    }
}
