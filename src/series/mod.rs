//! Aligned series types
//!
//! Raw Decimal observations from the feed boundary become f64 here; all
//! downstream statistics are floating point.

mod align;

pub use align::{align, merge_components, Component};

use chrono::NaiveDate;
use thiserror::Error;

/// One (date, value) point of a composed liquidity series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Liquidity and price on a common daily calendar.
///
/// Invariants: dates strictly increasing, columns equal length, every row
/// has both a liquidity value and a price.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub dates: Vec<NaiveDate>,
    pub liquidity: Vec<f64>,
    pub price: Vec<f64>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Alignment failures. All of these halt the pipeline: downstream
/// indicators assume a non-empty aligned series.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    #[error("liquidity series is empty")]
    EmptyLiquidity,
    #[error("price series is empty")]
    EmptyPrice,
    #[error("no price rows at or after the first liquidity observation")]
    NoOverlap,
}
