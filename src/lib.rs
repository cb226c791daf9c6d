//! liquidity-terminal: central-bank liquidity vs equity-index analytics
//!
//! This library provides the core components for:
//! - Liquidity series from FRED and daily index candles from Stooq
//! - Read-through caching of upstream responses with a short TTL
//! - Forward-fill alignment of sparse liquidity data onto the price calendar
//! - Rolling indicators: smoothing, momentum, min-max gauges, correlation
//! - A trailing-window linear fair-value model with valuation gap
//! - A threshold-tally bullish/neutral/bearish signal
//! - Terminal reporting: snapshot table and narrative brief

pub mod cache;
pub mod cli;
pub mod config;
pub mod feed;
pub mod indicators;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod series;
pub mod signal;
pub mod telemetry;
