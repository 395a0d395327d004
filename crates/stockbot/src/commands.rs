//! Command parsing for the interactive prompt
//!
//! Every command is one line: a verb followed by whitespace-separated
//! arguments. Argument count and shape are checked here so the dispatcher
//! never sees a command it cannot run.

use crate::error::{Result, StockError};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Latest stock price
    Stock { symbol: String },
    /// Latest cryptocurrency price
    Crypto { id: String },
    /// Recent news headlines
    News { symbol: String },
    /// Daily history over a period (configured default when `None`)
    History { symbol: String, period: Option<String> },
    /// Moving average over a window (configured default when `None`)
    MovingAverage { symbol: String, window: Option<usize> },
    /// Show help
    Help,
    /// Exit the bot
    Exit,
}

impl Command {
    /// Parse a command from user input
    ///
    /// Blank input is rejected as an invalid command; the REPL never passes it here.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let Some(verb) = parts.next() else {
            return Err(StockError::InvalidCommand(String::new()));
        };
        let args: Vec<&str> = parts.collect();

        match verb.to_lowercase().as_str() {
            "stock" => Ok(Command::Stock {
                symbol: required(&args, "stock")?.to_uppercase(),
            }),
            "crypto" => Ok(Command::Crypto {
                id: required(&args, "crypto")?.to_lowercase(),
            }),
            "news" => Ok(Command::News {
                symbol: required(&args, "news")?.to_uppercase(),
            }),
            "history" => Ok(Command::History {
                symbol: required(&args, "history")?.to_uppercase(),
                period: args.get(1).map(|p| p.to_lowercase()),
            }),
            "ma" => {
                let symbol = required(&args, "ma")?.to_uppercase();
                let window = args.get(1).map(|w| parse_window(w)).transpose()?;
                Ok(Command::MovingAverage { symbol, window })
            }
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            _ => Err(StockError::InvalidCommand(input.to_string())),
        }
    }

    /// Usage line for a verb
    pub fn usage(verb: &str) -> &'static str {
        match verb {
            "stock" => "stock <symbol>",
            "crypto" => "crypto <id>",
            "news" => "news <symbol>",
            "history" => "history <symbol> [period]",
            "ma" => "ma <symbol> [window]",
            "help" => "help",
            "exit" => "exit",
            _ => "type 'help' to see available commands",
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"Available commands:
1. stock <symbol> - Fetches real-time stock price.
   Example: stock AAPL

2. crypto <id> - Fetches real-time cryptocurrency price.
   Example: crypto bitcoin

3. news <symbol> - Fetches the latest stock news headlines for the specified symbol.
   Example: news AAPL

4. history <symbol> [period] - Fetches historical data for the specified symbol.
   Periods: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max
   Example: history AAPL 1mo

5. ma <symbol> [window] - Calculates the moving average for the specified symbol.
   Example: ma AAPL 20

6. exit - Exits the program.
   Example: exit

7. help - Displays this help menu.
   Example: help
"
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Stock { .. } => "Stock price",
            Command::Crypto { .. } => "Cryptocurrency price",
            Command::News { .. } => "News headlines",
            Command::History { .. } => "Historical data",
            Command::MovingAverage { .. } => "Moving average",
            Command::Help => "Show help",
            Command::Exit => "Exit the bot",
        }
    }
}

fn required<'a>(args: &[&'a str], verb: &str) -> Result<&'a str> {
    args.first()
        .copied()
        .ok_or_else(|| StockError::Usage(Command::usage(verb).to_string()))
}

fn parse_window(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(window) if window > 0 => Ok(window),
        _ => Err(StockError::Usage(format!(
            "{} (window must be a positive integer, got '{raw}')",
            Command::usage("ma")
        ))),
    }
}
