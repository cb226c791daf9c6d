//! Upstream data sources
//!
//! FRED supplies the liquidity series, Stooq the daily index candles. Both
//! are treated as opaque providers of time-indexed numeric series; the
//! traits exist so the pipeline can run against in-memory fixtures in tests.

mod error;
mod fred;
mod stooq;
mod types;

pub use error::FeedError;
pub use fred::{FredClient, FredConfig};
pub use stooq::{StooqClient, StooqConfig};
pub use types::{Candle, Observation};

use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of liquidity observations (weekly-or-coarser resolution)
#[async_trait]
pub trait LiquiditySource: Send + Sync {
    /// Fetch observations for a series id, ascending by date, never empty
    async fn fetch_observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Observation>, FeedError>;
}

/// Source of daily index candles (gaps on non-trading days)
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch daily candles for a symbol, ascending by date, never empty
    async fn fetch_candles(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>, FeedError>;
}
