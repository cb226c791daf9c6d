//! Forward-fill alignment
//!
//! Liquidity data changes weekly at best while prices tick daily; both the
//! component merge and the price alignment carry the last known liquidity
//! value forward. Nothing is interpolated and nothing is backfilled.

use super::{AlignError, AlignedSeries, SeriesPoint};
use crate::feed::{Candle, Observation};
use std::collections::BTreeSet;

/// One scaled input to a liquidity aggregate
#[derive(Debug, Clone, Copy)]
pub struct Component<'a> {
    pub observations: &'a [Observation],
    /// Unit conversion and sign, e.g. 1/1000 for WALCL, -1 for TGA
    pub scale: f64,
}

/// Merge component series into one liquidity aggregate.
///
/// Dates are the union of all component dates; each component is
/// forward-filled onto that union. Rows before every component has
/// reported at least once are skipped, so the aggregate never mixes a
/// real value with a missing one.
pub fn merge_components(components: &[Component]) -> Vec<SeriesPoint> {
    if components.is_empty() || components.iter().any(|c| c.observations.is_empty()) {
        return Vec::new();
    }

    let dates: BTreeSet<_> = components
        .iter()
        .flat_map(|c| c.observations.iter().map(|o| o.date))
        .collect();

    let mut iters: Vec<_> = components
        .iter()
        .map(|c| c.observations.iter().peekable())
        .collect();
    let mut current: Vec<Option<f64>> = vec![None; components.len()];

    let mut merged = Vec::with_capacity(dates.len());
    for date in dates {
        for (i, iter) in iters.iter_mut().enumerate() {
            while let Some(obs) = iter.peek() {
                if obs.date <= date {
                    let raw: f64 = obs.value.try_into().unwrap_or(0.0);
                    current[i] = Some(raw * components[i].scale);
                    iter.next();
                } else {
                    break;
                }
            }
        }

        if current.iter().all(|v| v.is_some()) {
            let value: f64 = current.iter().map(|v| v.unwrap_or(0.0)).sum();
            merged.push(SeriesPoint { date, value });
        }
    }

    merged
}

/// Align a liquidity series onto the price calendar.
///
/// The output is indexed on the candle dates; each row carries the candle
/// close and the most recent liquidity value at or before that date.
/// Candles before the first liquidity observation are dropped. Inputs must
/// be ascending by date (the feed clients sort on parse).
pub fn align(liquidity: &[SeriesPoint], candles: &[Candle]) -> Result<AlignedSeries, AlignError> {
    if liquidity.is_empty() {
        return Err(AlignError::EmptyLiquidity);
    }
    if candles.is_empty() {
        return Err(AlignError::EmptyPrice);
    }

    let mut liq_iter = liquidity.iter().peekable();
    let mut last_liq: Option<f64> = None;

    let mut dates = Vec::with_capacity(candles.len());
    let mut liq_col = Vec::with_capacity(candles.len());
    let mut price_col = Vec::with_capacity(candles.len());

    for candle in candles {
        while let Some(point) = liq_iter.peek() {
            if point.date <= candle.date {
                last_liq = Some(point.value);
                liq_iter.next();
            } else {
                break;
            }
        }

        if let Some(liq) = last_liq {
            dates.push(candle.date);
            liq_col.push(liq);
            price_col.push(candle.close.try_into().unwrap_or(0.0));
        }
    }

    if dates.is_empty() {
        return Err(AlignError::NoOverlap);
    }

    Ok(AlignedSeries {
        dates,
        liquidity: liq_col,
        price: price_col,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(y: i32, m: u32, d: u32, v: i64) -> Observation {
        Observation {
            date: date(y, m, d),
            value: Decimal::from(v),
        }
    }

    fn candle(y: i32, m: u32, d: u32, close: i64) -> Candle {
        let c = Decimal::from(close);
        Candle {
            date: date(y, m, d),
            open: c,
            high: c,
            low: c,
            close: c,
            volume: None,
        }
    }

    #[test]
    fn test_align_forward_fills() {
        // weekly liquidity, daily prices
        let liquidity = vec![
            SeriesPoint { date: date(2024, 1, 3), value: 6000.0 },
            SeriesPoint { date: date(2024, 1, 10), value: 6100.0 },
        ];
        let candles = vec![
            candle(2024, 1, 3, 100),
            candle(2024, 1, 4, 101),
            candle(2024, 1, 5, 102),
            candle(2024, 1, 8, 103),
            candle(2024, 1, 10, 104),
            candle(2024, 1, 11, 105),
        ];

        let aligned = align(&liquidity, &candles).unwrap();
        assert_eq!(aligned.len(), 6);
        // ffill holds 6000 until the 2024-01-10 observation lands
        assert_eq!(aligned.liquidity[..4], [6000.0, 6000.0, 6000.0, 6000.0]);
        assert_eq!(aligned.liquidity[4], 6100.0);
        assert_eq!(aligned.liquidity[5], 6100.0);
        assert_eq!(aligned.price[5], 105.0);
    }

    #[test]
    fn test_align_drops_rows_before_first_observation() {
        let liquidity = vec![SeriesPoint { date: date(2024, 1, 5), value: 10.0 }];
        let candles = vec![
            candle(2024, 1, 3, 100),
            candle(2024, 1, 4, 101),
            candle(2024, 1, 5, 102),
            candle(2024, 1, 8, 103),
        ];

        let aligned = align(&liquidity, &candles).unwrap();
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned.dates[0], date(2024, 1, 5));
    }

    #[test]
    fn test_align_no_backfill() {
        // price history ends before the only liquidity observation
        let liquidity = vec![SeriesPoint { date: date(2024, 2, 1), value: 10.0 }];
        let candles = vec![candle(2024, 1, 3, 100)];

        assert_eq!(align(&liquidity, &candles), Err(AlignError::NoOverlap));
    }

    #[test]
    fn test_align_empty_inputs() {
        let liquidity = vec![SeriesPoint { date: date(2024, 1, 3), value: 1.0 }];
        assert_eq!(align(&[], &[candle(2024, 1, 3, 1)]), Err(AlignError::EmptyLiquidity));
        assert_eq!(align(&liquidity, &[]), Err(AlignError::EmptyPrice));
    }

    #[test]
    fn test_align_dates_strictly_increasing() {
        let liquidity = vec![SeriesPoint { date: date(2024, 1, 1), value: 1.0 }];
        let candles = vec![
            candle(2024, 1, 2, 100),
            candle(2024, 1, 3, 101),
            candle(2024, 1, 4, 102),
        ];

        let aligned = align(&liquidity, &candles).unwrap();
        assert!(aligned.dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_merge_net_liquidity() {
        // WALCL in millions (scale 1/1000), TGA and RRP in billions (scale -1)
        let walcl = vec![obs(2024, 1, 3, 7_000_000), obs(2024, 1, 10, 7_100_000)];
        let tga = vec![obs(2024, 1, 4, 700)];
        let rrp = vec![obs(2024, 1, 3, 500), obs(2024, 1, 9, 400)];

        let merged = merge_components(&[
            Component { observations: &walcl, scale: 1.0 / 1000.0 },
            Component { observations: &tga, scale: -1.0 },
            Component { observations: &rrp, scale: -1.0 },
        ]);

        // 2024-01-03 is skipped: TGA has not reported yet
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].date, date(2024, 1, 4));
        assert_eq!(merged[0].value, 7000.0 - 700.0 - 500.0);
        assert_eq!(merged[1].date, date(2024, 1, 9));
        assert_eq!(merged[1].value, 7000.0 - 700.0 - 400.0);
        assert_eq!(merged[2].date, date(2024, 1, 10));
        assert_eq!(merged[2].value, 7100.0 - 700.0 - 400.0);
    }

    #[test]
    fn test_merge_single_component() {
        let ecb = vec![obs(2024, 1, 5, 6_900_000), obs(2024, 1, 12, 6_850_000)];
        let merged = merge_components(&[Component { observations: &ecb, scale: 1.0 / 1000.0 }]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].value, 6900.0);
    }

    #[test]
    fn test_merge_empty_component_yields_empty() {
        let walcl = vec![obs(2024, 1, 3, 1)];
        let merged = merge_components(&[
            Component { observations: &walcl, scale: 1.0 },
            Component { observations: &[], scale: -1.0 },
        ]);
        assert!(merged.is_empty());
    }
}
