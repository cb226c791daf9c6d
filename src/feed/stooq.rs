//! Stooq daily candle client
//!
//! Stooq serves historical daily OHLCV data as CSV from its `q/d/l/`
//! endpoint, no API key required. Index symbols use a caret prefix
//! (e.g. `^spx`).

use super::{Candle, FeedError, PriceSource};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for the Stooq client
#[derive(Debug, Clone)]
pub struct StooqConfig {
    /// Base URL for Stooq
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for StooqConfig {
    fn default() -> Self {
        Self {
            base_url: "https://stooq.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for Stooq's historical CSV endpoint
pub struct StooqClient {
    config: StooqConfig,
    client: Client,
}

impl StooqClient {
    pub fn new(config: StooqConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Parse Stooq CSV: `Date,Open,High,Low,Close,Volume` with a header row.
    /// Rows that fail to parse (e.g. "N/D" placeholders) are skipped.
    fn parse_csv(body: &str) -> Vec<Candle> {
        let mut candles: Vec<Candle> = body
            .lines()
            .skip(1)
            .filter_map(Self::parse_line)
            .collect();
        candles.sort_by_key(|c| c.date);
        candles
    }

    fn parse_line(line: &str) -> Option<Candle> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() < 5 {
            return None;
        }

        let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d").ok()?;
        let open = Decimal::from_str(fields[1]).ok()?;
        let high = Decimal::from_str(fields[2]).ok()?;
        let low = Decimal::from_str(fields[3]).ok()?;
        let close = Decimal::from_str(fields[4]).ok()?;
        let volume = fields.get(5).and_then(|v| v.parse::<u64>().ok());

        Some(Candle {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

#[async_trait]
impl PriceSource for StooqClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>, FeedError> {
        let url = format!("{}/q/d/l/", self.config.base_url);
        let d1 = start.format("%Y%m%d").to_string();
        let d2 = end.format("%Y%m%d").to_string();

        tracing::debug!(symbol, %start, %end, "Fetching Stooq candles");

        let response = self
            .client
            .get(&url)
            .query(&[("s", symbol), ("d1", &d1), ("d2", &d2), ("i", "d")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Upstream {
                source_name: "stooq",
                status,
                body,
            });
        }

        let body = response.text().await?;
        let candles = Self::parse_csv(&body);

        if candles.is_empty() {
            return Err(FeedError::EmptySeries(symbol.to_string()));
        }

        tracing::debug!(symbol, rows = candles.len(), "Stooq series fetched");
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-02,4745.20,4754.33,4722.67,4742.83,3743050000
2024-01-03,4725.07,4729.29,4699.71,4704.81,3950760000
";

    #[test]
    fn test_parse_csv() {
        let candles = StooqClient::parse_csv(SAMPLE);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(candles[0].close, dec!(4742.83));
        assert_eq!(candles[1].volume, Some(3_950_760_000));
    }

    #[test]
    fn test_parse_csv_without_volume() {
        let body = "Date,Open,High,Low,Close\n2024-01-02,100,101,99,100.5\n";
        let candles = StooqClient::parse_csv(body);
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, dec!(100.5));
        assert_eq!(candles[0].volume, None);
    }

    #[test]
    fn test_parse_csv_skips_placeholder_rows() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-01-02,N/D,N/D,N/D,N/D,0\n2024-01-03,1,2,0.5,1.5,10\n";
        let candles = StooqClient::parse_csv(body);
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, dec!(1.5));
    }

    #[test]
    fn test_parse_csv_header_only() {
        let candles = StooqClient::parse_csv("Date,Open,High,Low,Close,Volume\n");
        assert!(candles.is_empty());
    }

    #[test]
    fn test_parse_csv_sorts_by_date() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-01-03,1,2,0.5,1.5,10\n2024-01-02,1,2,0.5,1.0,10\n";
        let candles = StooqClient::parse_csv(body);
        assert_eq!(candles[0].close, dec!(1.0));
        assert!(candles[0].date < candles[1].date);
    }
}
