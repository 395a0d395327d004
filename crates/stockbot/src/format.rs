//! Response formatting utilities

use crate::api::Quote;
use crate::error::Result;
use crate::fetchers::{MovingAverage, NewsItem, PriceResult};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};

/// Dollar amount with exactly two decimals
pub fn usd(value: f64) -> String {
    format!("${value:.2}")
}

/// First character uppercased, the rest lowercased
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn price_line(result: &PriceResult) -> String {
    format!("{} Price: {}", result.label, usd(result.price))
}

pub fn moving_average_line(ma: &MovingAverage) -> String {
    format!("{} {}-Day Moving Average: {}", ma.symbol, ma.window, usd(ma.value))
}

/// `News for SYMBOL:` followed by one bullet per item and a blank line.
///
/// A failed lookup is shown as a single bullet carrying the error.
pub fn news_block(symbol: &str, items: &Result<Vec<NewsItem>>) -> String {
    let mut output = format!("News for {}:\n", symbol.to_uppercase());
    match items {
        Ok(items) => {
            for item in items {
                output.push_str(&news_bullet(&item.title, &item.url));
            }
        }
        Err(e) => output.push_str(&news_bullet(&e.to_string(), "")),
    }
    output
}

fn news_bullet(title: &str, url: &str) -> String {
    if url.is_empty() {
        format!("- {title}\n")
    } else {
        format!("- {title} ({url})\n")
    }
}

/// Table of daily bars, oldest first
pub fn history_table(symbol: &str, period: &str, quotes: &[Quote]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Date", "Open", "High", "Low", "Close", "Volume"]);

    for q in quotes {
        table.add_row(vec![
            q.timestamp.format("%Y-%m-%d").to_string(),
            format!("{:.2}", q.open),
            format!("{:.2}", q.high),
            format!("{:.2}", q.low),
            format!("{:.2}", q.close),
            q.volume.to_string(),
        ]);
    }

    for index in 1..=5 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    format!(
        "{} history ({}, {} trading days):\n{table}",
        symbol.to_uppercase(),
        period,
        quotes.len()
    )
}

/// Render a fetcher outcome: success through `render`, failure as its message
pub fn outcome<T>(result: &Result<T>, render: impl FnOnce(&T) -> String) -> String {
    match result {
        Ok(value) => render(value),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use crate::fetchers::test_support::quotes;

    #[test]
    fn test_usd_two_decimals() {
        assert_eq!(usd(123.456), "$123.46");
        assert_eq!(usd(65000.5), "$65000.50");
        assert_eq!(usd(0.0), "$0.00");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bitcoin"), "Bitcoin");
        assert_eq!(capitalize("usd-coin"), "Usd-coin");
        assert_eq!(capitalize("ETHEREUM"), "Ethereum");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_price_line() {
        let result = PriceResult {
            label: "Bitcoin".to_string(),
            price: 65000.5,
        };
        assert_eq!(price_line(&result), "Bitcoin Price: $65000.50");
    }

    #[test]
    fn test_moving_average_line() {
        let ma = MovingAverage {
            symbol: "AAPL".to_string(),
            window: 20,
            value: 187.123,
        };
        assert_eq!(moving_average_line(&ma), "AAPL 20-Day Moving Average: $187.12");
    }

    #[test]
    fn test_news_block() {
        let items = Ok(vec![
            NewsItem::new("Apple ships", "https://news.test/1"),
            NewsItem::placeholder(),
        ]);
        assert_eq!(
            news_block("aapl", &items),
            "News for AAPL:\n- Apple ships (https://news.test/1)\n- No recent news found.\n"
        );
    }

    #[test]
    fn test_news_block_error() {
        let items = Err(StockError::News("Unknown error".to_string()));
        assert_eq!(
            news_block("AAPL", &items),
            "News for AAPL:\n- Error fetching news: Unknown error\n"
        );
    }

    #[test]
    fn test_history_table() {
        let series = quotes("AAPL", &[101.0, 102.25]);
        let rendered = history_table("aapl", "1mo", &series);

        assert!(rendered.starts_with("AAPL history (1mo, 2 trading days):\n"));
        assert!(rendered.contains("Close"));
        assert!(rendered.contains("2024-01-01"));
        assert!(rendered.contains("102.25"));
    }

    #[test]
    fn test_outcome() {
        let ok: Result<f64> = Ok(1.5);
        assert_eq!(outcome(&ok, |v| usd(*v)), "$1.50");

        let err: Result<f64> = Err(StockError::NoStockData("AAPL".to_string()));
        assert_eq!(
            outcome(&err, |v| usd(*v)),
            "Error: No stock data available for AAPL."
        );
    }
}
