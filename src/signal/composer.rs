//! Threshold tally

use super::{Condition, Signal, SignalInputs, Stance, Verdict};
use crate::config::SignalConfig;
use chrono::Utc;

/// Scores the fixed condition set and tallies the votes.
///
/// The bullish check runs before the bearish one, so a frame that clears
/// both vote floors resolves bullish. Deterministic: the same inputs always
/// produce the same stance.
pub struct SignalComposer {
    config: SignalConfig,
}

impl SignalComposer {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    fn check(label: &str, value: f64, bullish_above: f64, bearish_below: f64) -> Condition {
        let verdict = if value.is_nan() {
            Verdict::Mute
        } else if value > bullish_above {
            Verdict::Bullish
        } else if value < bearish_below {
            Verdict::Bearish
        } else {
            Verdict::Mute
        };
        Condition {
            label: label.to_string(),
            value,
            verdict,
        }
    }

    pub fn compose(&self, inputs: SignalInputs) -> Signal {
        let c = &self.config;
        let conditions = vec![
            Self::check(
                "liquidity/price correlation",
                inputs.correlation,
                c.correlation_bullish,
                c.correlation_bearish,
            ),
            Self::check(
                "3M liquidity change",
                inputs.liquidity_3m_pct,
                c.liquidity_3m_bullish,
                c.liquidity_3m_bearish,
            ),
            Self::check(
                "1M price change",
                inputs.price_1m_pct,
                c.price_1m_bullish,
                c.price_1m_bearish,
            ),
            Self::check(
                "liquidity YoY change",
                inputs.liquidity_yoy_pct,
                c.liquidity_yoy_bullish,
                c.liquidity_yoy_bearish,
            ),
        ];

        let bullish_votes = conditions
            .iter()
            .filter(|c| c.verdict == Verdict::Bullish)
            .count();
        let bearish_votes = conditions
            .iter()
            .filter(|c| c.verdict == Verdict::Bearish)
            .count();

        let stance = if bullish_votes >= c.min_bullish_votes {
            Stance::Bullish
        } else if bearish_votes >= c.min_bearish_votes {
            Stance::Bearish
        } else {
            Stance::Neutral
        };

        Signal {
            stance,
            bullish_votes,
            bearish_votes,
            conditions,
            timestamp: Utc::now(),
        }
    }
}
