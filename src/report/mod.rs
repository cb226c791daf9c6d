//! Terminal rendering of a pipeline snapshot

use crate::pipeline::Snapshot;
use crate::signal::Verdict;

/// Overheat reading above which the brief flags stretched pricing
const OVERHEAT_HOT: f64 = 80.0;
/// Overheat reading below which the brief flags depressed pricing
const OVERHEAT_COLD: f64 = 30.0;

fn num(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:+.precision$}")
    }
}

fn gauge(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.1}")
    }
}

/// Format the latest KPI row as a boxed table for CLI output
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let spec = snapshot.region.spec();
    let frame = &snapshot.frame;
    let latest = |col: &[f64]| col.last().copied().unwrap_or(f64::NAN);

    let liquidity = latest(&frame.liquidity);
    let price = latest(&frame.price);

    let fair_value_lines = match &snapshot.fair_value {
        Some(fit) => format!(
            "Fair Value Gap:   {}%\nFit R²:           {}\nFit Window:       {} rows",
            num(fit.latest_gap(), 2),
            gauge(fit.r_squared),
            fit.window,
        ),
        None => "Fair Value:       insufficient history".to_string(),
    };

    format!(
        r#"
══════════════════════════════════════════════════════
  LIQUIDITY TERMINAL — {} ({})
══════════════════════════════════════════════════════

LEVELS
───────────────────────────────────────────────────────
{} ({}): {:.1}
{}:          {:.1}

MOMENTUM
───────────────────────────────────────────────────────
Liquidity 3M:     {}%    YoY: {}%
Price 1M:         {}%    YoY: {}%

GAUGES (0-100)
───────────────────────────────────────────────────────
Liquidity Index:  {}
Price Index:      {}
Overheat:         {}
Correlation:      {}

FAIR VALUE (price ~ liquidity)
───────────────────────────────────────────────────────
{}

SIGNAL
───────────────────────────────────────────────────────
Stance:           {}  (bullish {} / bearish {})
══════════════════════════════════════════════════════
"#,
        spec.label,
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC"),
        spec.liquidity_label,
        spec.liquidity_unit,
        liquidity,
        spec.index_label,
        price,
        num(latest(&frame.liquidity_momentum.m3), 2),
        num(latest(&frame.liquidity_momentum.y1), 2),
        num(latest(&frame.price_momentum.m1), 2),
        num(latest(&frame.price_momentum.y1), 2),
        gauge(latest(&frame.liquidity_index)),
        gauge(latest(&frame.price_index)),
        gauge(latest(&frame.overheat)),
        num(latest(&frame.correlation), 2),
        fair_value_lines,
        snapshot.signal.stance,
        snapshot.signal.bullish_votes,
        snapshot.signal.bearish_votes,
    )
}

/// Short narrative paragraphs for the latest snapshot
pub fn brief(snapshot: &Snapshot) -> String {
    let spec = snapshot.region.spec();
    let frame = &snapshot.frame;
    let overheat = frame.overheat.last().copied().unwrap_or(f64::NAN);

    let mut paragraphs = Vec::new();

    paragraphs.push(if overheat.is_nan() {
        format!(
            "{} valuation gauge is still warming up; not enough history for a reading.",
            spec.index_label
        )
    } else if overheat > OVERHEAT_HOT {
        format!(
            "Overheat gauge at {overheat:.1}: {} is expensive relative to the liquidity backdrop.",
            spec.index_label
        )
    } else if overheat < OVERHEAT_COLD {
        format!(
            "Overheat gauge at {overheat:.1}: {} is cheap relative to the liquidity backdrop.",
            spec.index_label
        )
    } else {
        format!(
            "Overheat gauge at {overheat:.1}: {} is trading within its liquidity-implied range.",
            spec.index_label
        )
    });

    match &snapshot.fair_value {
        Some(fit) => {
            let gap = fit.latest_gap();
            if !gap.is_nan() {
                let side = if gap >= 0.0 { "above" } else { "below" };
                paragraphs.push(format!(
                    "The trailing {}-day regression puts {} {:.1}% {} its liquidity-implied level (R² {:.2}).",
                    fit.window,
                    spec.index_label,
                    gap.abs(),
                    side,
                    fit.r_squared,
                ));
            }
        }
        None => paragraphs.push(
            "Fair value model not fit: history is shorter than the regression window.".to_string(),
        ),
    }

    let bullish: Vec<&str> = snapshot
        .signal
        .conditions
        .iter()
        .filter(|c| c.verdict == Verdict::Bullish)
        .map(|c| c.label.as_str())
        .collect();
    let bearish: Vec<&str> = snapshot
        .signal
        .conditions
        .iter()
        .filter(|c| c.verdict == Verdict::Bearish)
        .map(|c| c.label.as_str())
        .collect();

    let mut signal_line = format!("Composite signal: {}.", snapshot.signal.stance);
    if !bullish.is_empty() {
        signal_line.push_str(&format!(" Supporting: {}.", bullish.join(", ")));
    }
    if !bearish.is_empty() {
        signal_line.push_str(&format!(" Against: {}.", bearish.join(", ")));
    }
    paragraphs.push(signal_line);

    paragraphs.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Region};
    use crate::indicators::IndicatorEngine;
    use crate::model::{FairValueModel, LinearModel};
    use crate::pipeline::Snapshot;
    use crate::series::AlignedSeries;
    use crate::signal::SignalComposer;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn snapshot(n: usize, fit: bool) -> Snapshot {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let aligned = AlignedSeries {
            dates: (0..n).map(|i| start + chrono::Days::new(i as u64)).collect(),
            liquidity: (0..n).map(|i| 6000.0 + i as f64).collect(),
            price: (0..n).map(|i| 4000.0 + 2.0 * i as f64).collect(),
        };
        let config: Config = toml::from_str(
            "[feed]\nfred_api_key = \"\"\n[telemetry]\nlog_level = \"info\"\n",
        )
        .unwrap();
        let engine = IndicatorEngine::new(&config.pipeline);
        let frame = engine.compute(&aligned);
        let fair_value = if fit {
            LinearModel::new(config.model.regression_window)
                .fit(&frame.liquidity, &frame.price)
                .ok()
        } else {
            None
        };
        let signal =
            SignalComposer::new(config.signal.clone()).compose(Snapshot::signal_inputs(&frame));
        Snapshot {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            region: Region::Us,
            frame,
            fair_value,
            signal,
        }
    }

    #[test]
    fn test_format_snapshot_contains_sections() {
        let text = format_snapshot(&snapshot(300, true));
        assert!(text.contains("LIQUIDITY TERMINAL — United States"));
        assert!(text.contains("Fed Net Liquidity"));
        assert!(text.contains("Overheat"));
        assert!(text.contains("Stance:"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_format_snapshot_without_fit() {
        let text = format_snapshot(&snapshot(100, false));
        assert!(text.contains("insufficient history"));
    }

    #[test]
    fn test_brief_mentions_signal() {
        let text = brief(&snapshot(300, true));
        assert!(text.contains("Composite signal"));
        assert!(text.contains("regression puts"));
    }

    #[test]
    fn test_brief_short_history() {
        let text = brief(&snapshot(100, false));
        assert!(text.contains("Fair value model not fit"));
    }
}
