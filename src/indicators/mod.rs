//! Indicator engine
//!
//! Turns an aligned (liquidity, price) series into the derived columns the
//! report and the signal composer consume. Every column keeps the input
//! length; warm-up points are NaN.

mod rolling;

pub use rolling::{pct_change, rolling_correlation, rolling_mean, rolling_minmax_normalize};

use crate::config::PipelineConfig;
use crate::series::AlignedSeries;
use chrono::NaiveDate;

/// Trading-day lookbacks for the momentum columns
pub const WEEK: usize = 5;
pub const MONTH: usize = 21;
pub const QUARTER: usize = 63;
pub const HALF_YEAR: usize = 126;
pub const YEAR: usize = 252;

/// Percentage-change columns over the fixed lookbacks
#[derive(Debug, Clone, PartialEq)]
pub struct Momentum {
    pub w1: Vec<f64>,
    pub m1: Vec<f64>,
    pub m3: Vec<f64>,
    pub m6: Vec<f64>,
    pub y1: Vec<f64>,
}

impl Momentum {
    fn of(series: &[f64]) -> Self {
        Self {
            w1: pct_change(series, WEEK),
            m1: pct_change(series, MONTH),
            m3: pct_change(series, QUARTER),
            m6: pct_change(series, HALF_YEAR),
            y1: pct_change(series, YEAR),
        }
    }
}

/// The full derived table, column per indicator
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub dates: Vec<NaiveDate>,
    pub liquidity: Vec<f64>,
    pub price: Vec<f64>,

    pub liquidity_smooth: Vec<f64>,
    pub price_smooth: Vec<f64>,

    pub liquidity_momentum: Momentum,
    pub price_momentum: Momentum,

    /// Trailing Pearson correlation between liquidity and price
    pub correlation: Vec<f64>,

    /// Min-max position of liquidity within the trailing window, 0-100
    pub liquidity_index: Vec<f64>,
    /// Min-max position of price within the trailing window, 0-100
    pub price_index: Vec<f64>,
    /// Min-max position of the price/liquidity ratio, 0-100. High readings
    /// mean price has outrun the liquidity backdrop.
    pub overheat: Vec<f64>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Last value of a column (the KPI row)
    pub fn latest(column: &[f64]) -> f64 {
        column.last().copied().unwrap_or(f64::NAN)
    }
}

/// Computes the indicator table for an aligned series
#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine {
    smoothing_window: usize,
    normalize_window: usize,
    correlation_window: usize,
}

impl IndicatorEngine {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            smoothing_window: config.smoothing_window,
            normalize_window: config.normalize_window,
            correlation_window: config.correlation_window,
        }
    }

    pub fn compute(&self, aligned: &AlignedSeries) -> IndicatorFrame {
        let liquidity = &aligned.liquidity;
        let price = &aligned.price;

        let ratio: Vec<f64> = liquidity
            .iter()
            .zip(price.iter())
            .map(|(l, p)| if *l > 0.0 { p / l } else { f64::NAN })
            .collect();

        IndicatorFrame {
            dates: aligned.dates.clone(),
            liquidity: liquidity.clone(),
            price: price.clone(),
            liquidity_smooth: rolling_mean(liquidity, self.smoothing_window),
            price_smooth: rolling_mean(price, self.smoothing_window),
            liquidity_momentum: Momentum::of(liquidity),
            price_momentum: Momentum::of(price),
            correlation: rolling_correlation(liquidity, price, self.correlation_window),
            liquidity_index: rolling_minmax_normalize(liquidity, self.normalize_window),
            price_index: rolling_minmax_normalize(price, self.normalize_window),
            overheat: rolling_minmax_normalize(&ratio, self.normalize_window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn aligned(n: usize, liquidity: impl Fn(usize) -> f64, price: impl Fn(usize) -> f64) -> AlignedSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        AlignedSeries {
            dates: (0..n).map(|i| start + chrono::Days::new(i as u64)).collect(),
            liquidity: (0..n).map(liquidity).collect(),
            price: (0..n).map(price).collect(),
        }
    }

    fn engine() -> IndicatorEngine {
        IndicatorEngine::new(&PipelineConfig::default())
    }

    #[test]
    fn test_columns_keep_input_length() {
        let frame = engine().compute(&aligned(300, |i| 6000.0 + i as f64, |i| 4000.0 + i as f64));
        assert_eq!(frame.len(), 300);
        assert_eq!(frame.liquidity_smooth.len(), 300);
        assert_eq!(frame.liquidity_momentum.y1.len(), 300);
        assert_eq!(frame.correlation.len(), 300);
        assert_eq!(frame.overheat.len(), 300);
    }

    #[test]
    fn test_comoving_series_correlate() {
        let frame = engine().compute(&aligned(300, |i| 6000.0 + i as f64, |i| 4000.0 + 2.0 * i as f64));
        let last = IndicatorFrame::latest(&frame.correlation);
        assert!((last - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_liquidity_pins_gauge_at_neutral() {
        let frame = engine().compute(&aligned(300, |_| 1000.0, |i| 100.0 + i as f64 / 3.0));
        // zero range inside the window resolves to the 50 midpoint
        assert_eq!(IndicatorFrame::latest(&frame.liquidity_index), 50.0);
        // flat liquidity YoY momentum is exactly zero
        assert_eq!(IndicatorFrame::latest(&frame.liquidity_momentum.y1), 0.0);
        // one leg has no variance, so correlation stays undefined
        assert!(IndicatorFrame::latest(&frame.correlation).is_nan());
    }

    #[test]
    fn test_overheat_rises_when_price_outruns_liquidity() {
        let frame = engine().compute(&aligned(300, |_| 5000.0, |i| 100.0 * 1.01f64.powi(i as i32)));
        let last = IndicatorFrame::latest(&frame.overheat);
        assert!((last - 100.0).abs() < 1e-9, "got {last}");
    }

    #[test]
    fn test_warmup_is_nan() {
        let frame = engine().compute(&aligned(300, |i| 6000.0 + i as f64, |i| 4000.0 + i as f64));
        assert!(frame.liquidity_smooth[18].is_nan());
        assert!(!frame.liquidity_smooth[19].is_nan());
        assert!(frame.correlation[88].is_nan());
        assert!(!frame.correlation[89].is_nan());
        assert!(frame.price_momentum.y1[251].is_nan());
        assert!(!frame.price_momentum.y1[252].is_nan());
    }

    #[test]
    fn test_compute_is_deterministic() {
        let input = aligned(300, |i| 6000.0 + (i % 17) as f64, |i| 4000.0 + (i % 13) as f64);
        let a = engine().compute(&input);
        let b = engine().compute(&input);
        for (x, y) in a.correlation.iter().zip(b.correlation.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
        for (x, y) in a.overheat.iter().zip(b.overheat.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}
