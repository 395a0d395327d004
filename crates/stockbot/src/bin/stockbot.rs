//! Stockbot CLI
//!
//! An interactive prompt for stock prices, crypto prices, news and history.
//!
//! # Usage
//!
//! ```bash
//! # News lookups need an Alpha Vantage key, read from the environment or .env
//! export ALPHA_VANTAGE_API_KEY="your-key"
//!
//! # Run the bot
//! cargo run --bin stockbot -p stockbot
//! ```

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use stockbot::secrets::{DotenvOutcome, EnvSecrets, load_dotenv};
use stockbot::{BotConfig, StockBot, StockConfig};

#[derive(Parser, Debug)]
#[command(name = "stockbot")]
#[command(about = "Interactive stock, crypto and market news lookups", long_about = None)]
struct Args {
    /// Dotenv file to load before reading API keys (default: ./.env if present)
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Disable response caching
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env first so RUST_LOG set there is honoured
    let dotenv = load_dotenv(args.env_file.as_deref());
    stockbot_utils::init_tracing();

    match dotenv.context("loading environment file")? {
        DotenvOutcome::Loaded(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        DotenvOutcome::NotFound => tracing::debug!("No .env file found"),
    }

    let mut stock_config = StockConfig::builder()
        .with_secrets(&EnvSecrets)
        .cache_enabled(!args.no_cache);
    if let Some(secs) = args.timeout {
        stock_config = stock_config.request_timeout(Duration::from_secs(secs));
    }
    let stock_config = stock_config.build()?;

    if stock_config.alpha_vantage_api_key.is_none() {
        tracing::warn!("ALPHA_VANTAGE_API_KEY not set; news lookups will fail");
    }

    let bot = StockBot::from_config(BotConfig::builder().stock_config(stock_config).build())?;

    println!("{}", bot.welcome());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    bot.run_repl(stdin.lock(), &mut stdout).await?;

    Ok(())
}
