//! Feed types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single observation of a liquidity series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date (daily resolution)
    pub date: NaiveDate,
    /// Value in the source's native units
    pub value: Decimal,
}

/// One daily OHLCV candle of an index price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Trading day
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Missing for some index symbols
    pub volume: Option<u64>,
}
