//! Configuration types for liquidity-terminal

use clap::ValueEnum;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub signal: SignalConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub telemetry: TelemetryConfig,
}

/// Upstream data source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// FRED API key (https://fred.stlouisfed.org/docs/api/api_key.html)
    pub fred_api_key: String,
    #[serde(default = "default_fred_base_url")]
    pub fred_base_url: String,
    #[serde(default = "default_stooq_base_url")]
    pub stooq_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_fred_base_url() -> String {
    "https://api.stlouisfed.org/fred".to_string()
}
fn default_stooq_base_url() -> String {
    "https://stooq.com".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

/// Alignment and indicator windows, all in trading days
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// How much history to request from the upstream sources
    #[serde(default = "default_history_days")]
    pub history_days: i64,

    /// Rolling-mean window for the smoothed liquidity/price columns
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,

    /// Window for the min-max liquidity/price/overheat gauges
    #[serde(default = "default_normalize_window")]
    pub normalize_window: usize,

    /// Window for the rolling liquidity/price correlation
    #[serde(default = "default_correlation_window")]
    pub correlation_window: usize,
}

fn default_history_days() -> i64 {
    365 * 5
}
fn default_smoothing_window() -> usize {
    20
}
fn default_normalize_window() -> usize {
    252
}
fn default_correlation_window() -> usize {
    90
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_days: 365 * 5,
            smoothing_window: 20,
            normalize_window: 252,
            correlation_window: 90,
        }
    }
}

/// Fair value model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Trailing fit window in trading days; the model only fits when strictly
    /// more rows than this are available
    #[serde(default = "default_regression_window")]
    pub regression_window: usize,
}

fn default_regression_window() -> usize {
    252
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            regression_window: 252,
        }
    }
}

/// Signal thresholds. The constants are hand-tuned scoring rules carried over
/// from the dashboard, not fitted parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    #[serde(default = "default_correlation_bullish")]
    pub correlation_bullish: f64,
    #[serde(default)]
    pub correlation_bearish: f64,
    #[serde(default)]
    pub liquidity_3m_bullish: f64,
    #[serde(default = "default_liquidity_3m_bearish")]
    pub liquidity_3m_bearish: f64,
    #[serde(default)]
    pub price_1m_bullish: f64,
    #[serde(default = "default_price_1m_bearish")]
    pub price_1m_bearish: f64,
    #[serde(default)]
    pub liquidity_yoy_bullish: f64,
    #[serde(default = "default_liquidity_yoy_bearish")]
    pub liquidity_yoy_bearish: f64,

    /// Bullish votes required for a bullish signal (checked first)
    #[serde(default = "default_min_bullish_votes")]
    pub min_bullish_votes: usize,
    /// Bearish votes required for a bearish signal
    #[serde(default = "default_min_bearish_votes")]
    pub min_bearish_votes: usize,
}

fn default_correlation_bullish() -> f64 {
    0.5
}
fn default_liquidity_3m_bearish() -> f64 {
    -1.0
}
fn default_price_1m_bearish() -> f64 {
    -3.0
}
fn default_liquidity_yoy_bearish() -> f64 {
    -2.0
}
fn default_min_bullish_votes() -> usize {
    3
}
fn default_min_bearish_votes() -> usize {
    2
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            correlation_bullish: 0.5,
            correlation_bearish: 0.0,
            liquidity_3m_bullish: 0.0,
            liquidity_3m_bearish: -1.0,
            price_1m_bullish: 0.0,
            price_1m_bearish: -3.0,
            liquidity_yoy_bullish: 0.0,
            liquidity_yoy_bearish: -2.0,
            min_bullish_votes: 3,
            min_bearish_votes: 2,
        }
    }
}

/// Upstream response cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// How long a cached upstream response stays valid
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    900
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 900 }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Analysis region. A closed set: each variant resolves to a fixed
/// [`RegionSpec`] instead of a string-keyed lookup at use time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Region {
    /// Fed net liquidity vs S&P 500
    Us,
    /// ECB balance sheet vs DAX
    EuroArea,
    /// BoJ balance sheet vs Nikkei 225
    Japan,
}

/// Identifiers and labels for one region's analysis
#[derive(Debug, Clone, Copy)]
pub struct RegionSpec {
    pub label: &'static str,
    /// Stooq symbol for the index price series
    pub index_symbol: &'static str,
    pub index_label: &'static str,
    pub liquidity_label: &'static str,
    /// Unit label after component scaling
    pub liquidity_unit: &'static str,
    /// FRED components of the liquidity aggregate
    pub components: &'static [LiquidityComponent],
}

/// One FRED series contributing to a liquidity aggregate.
///
/// `scale` converts the source units into the region's display unit and
/// carries the sign: US net liquidity is WALCL/1000 (millions to billions)
/// minus TGA minus RRP (both already in billions).
#[derive(Debug, Clone, Copy)]
pub struct LiquidityComponent {
    pub series_id: &'static str,
    pub scale: f64,
}

const US_SPEC: RegionSpec = RegionSpec {
    label: "United States",
    index_symbol: "^spx",
    index_label: "S&P 500",
    liquidity_label: "Fed Net Liquidity",
    liquidity_unit: "$B",
    components: &[
        LiquidityComponent {
            series_id: "WALCL",
            scale: 1.0 / 1000.0,
        },
        LiquidityComponent {
            series_id: "WDTGAL",
            scale: -1.0,
        },
        LiquidityComponent {
            series_id: "RRPONTSYD",
            scale: -1.0,
        },
    ],
};

const EURO_AREA_SPEC: RegionSpec = RegionSpec {
    label: "Euro Area",
    index_symbol: "^dax",
    index_label: "DAX",
    liquidity_label: "ECB Balance Sheet",
    liquidity_unit: "EUR B",
    components: &[LiquidityComponent {
        series_id: "ECBASSETSW",
        scale: 1.0 / 1000.0,
    }],
};

const JAPAN_SPEC: RegionSpec = RegionSpec {
    label: "Japan",
    index_symbol: "^nkx",
    index_label: "Nikkei 225",
    liquidity_label: "BoJ Balance Sheet",
    liquidity_unit: "JPY B",
    components: &[LiquidityComponent {
        series_id: "JPNASSETS",
        scale: 1.0 / 10.0,
    }],
};

impl Region {
    /// Resolve the validated configuration record for this region
    pub fn spec(&self) -> &'static RegionSpec {
        match self {
            Region::Us => &US_SPEC,
            Region::EuroArea => &EURO_AREA_SPEC,
            Region::Japan => &JAPAN_SPEC,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spec().label)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
