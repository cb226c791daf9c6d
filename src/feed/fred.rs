//! FRED observations client
//!
//! Fetches (date, value) observations for a series id from the St. Louis
//! Fed's FRED API. Values arrive as strings; missing observations are
//! encoded as "." and skipped.

use super::{FeedError, LiquiditySource, Observation};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for the FRED client
#[derive(Debug, Clone)]
pub struct FredConfig {
    /// Base URL for the FRED API
    pub base_url: String,
    /// API key, required by the observations endpoint
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl FredConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.stlouisfed.org/fred".to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the FRED observations endpoint
pub struct FredClient {
    config: FredConfig,
    client: Client,
}

impl FredClient {
    pub fn new(config: FredConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Parse the observations array out of a FRED JSON payload.
    ///
    /// Rows with a "." value (FRED's missing marker) are skipped, as are
    /// rows whose date or value fails to parse.
    fn parse_observations(json: &Value) -> Result<Vec<Observation>, FeedError> {
        let observations = json["observations"].as_array().ok_or_else(|| {
            FeedError::Malformed("no observations array in FRED response".to_string())
        })?;

        let mut points = Vec::with_capacity(observations.len());
        for obs in observations {
            let (Some(date_str), Some(value_str)) = (obs["date"].as_str(), obs["value"].as_str())
            else {
                continue;
            };
            if value_str == "." {
                continue;
            }
            let (Ok(date), Ok(value)) = (
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d"),
                Decimal::from_str(value_str),
            ) else {
                continue;
            };
            points.push(Observation { date, value });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

#[async_trait]
impl LiquiditySource for FredClient {
    async fn fetch_observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Observation>, FeedError> {
        let url = format!("{}/series/observations", self.config.base_url);

        tracing::debug!(series_id, %start, %end, "Fetching FRED observations");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.config.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", &start.to_string()),
                ("observation_end", &end.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Upstream {
                source_name: "fred",
                status,
                body,
            });
        }

        let json: Value = response.json().await?;
        let points = Self::parse_observations(&json)?;

        if points.is_empty() {
            return Err(FeedError::EmptySeries(series_id.to_string()));
        }

        tracing::debug!(series_id, rows = points.len(), "FRED series fetched");
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_valid_response() {
        let payload = json!({
            "observations": [
                { "date": "2024-01-03", "value": "7712.345" },
                { "date": "2024-01-10", "value": "7698.120" }
            ]
        });

        let points = FredClient::parse_observations(&payload).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, dec!(7712.345));
        assert_eq!(
            points[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_parse_skips_missing_marker() {
        let payload = json!({
            "observations": [
                { "date": "2024-01-03", "value": "." },
                { "date": "2024-01-10", "value": "100.0" }
            ]
        });

        let points = FredClient::parse_observations(&payload).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, dec!(100.0));
    }

    #[test]
    fn test_parse_sorts_by_date() {
        let payload = json!({
            "observations": [
                { "date": "2024-02-07", "value": "2.0" },
                { "date": "2024-01-31", "value": "1.0" }
            ]
        });

        let points = FredClient::parse_observations(&payload).unwrap();
        assert!(points[0].date < points[1].date);
        assert_eq!(points[0].value, dec!(1.0));
    }

    #[test]
    fn test_parse_malformed_payload() {
        let payload = json!({ "error_message": "Bad Request" });
        assert!(FredClient::parse_observations(&payload).is_err());
    }

    #[test]
    fn test_parse_skips_unparseable_rows() {
        let payload = json!({
            "observations": [
                { "date": "not-a-date", "value": "1.0" },
                { "date": "2024-01-10", "value": "abc" },
                { "date": "2024-01-17", "value": "3.5" }
            ]
        });

        let points = FredClient::parse_observations(&payload).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, dec!(3.5));
    }
}
