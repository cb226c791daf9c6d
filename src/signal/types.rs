//! Signal types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discrete market stance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Bullish,
    Neutral,
    Bearish,
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Stance::Bullish => "BULLISH",
            Stance::Neutral => "NEUTRAL",
            Stance::Bearish => "BEARISH",
        };
        f.write_str(label)
    }
}

/// How a single condition voted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Bullish,
    Bearish,
    /// Between thresholds, or the input was not yet available (NaN)
    Mute,
}

/// One evaluated scoring condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub label: String,
    pub value: f64,
    pub verdict: Verdict,
}

/// Indicator values the composer scores, taken from the latest frame row.
/// Any of them may be NaN during warm-up.
#[derive(Debug, Clone, Copy)]
pub struct SignalInputs {
    pub correlation: f64,
    pub liquidity_3m_pct: f64,
    pub price_1m_pct: f64,
    pub liquidity_yoy_pct: f64,
}

/// The composed signal with its full tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub stance: Stance,
    pub bullish_votes: usize,
    pub bearish_votes: usize,
    pub conditions: Vec<Condition>,
    pub timestamp: DateTime<Utc>,
}
