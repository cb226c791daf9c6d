//! Windowed statistics over f64 columns
//!
//! Every function returns a column the same length as its input, with NaN
//! for points inside the warm-up window. NaN inputs inside a window make
//! that window's output NaN; consumers treat NaN as "not yet available".

/// Simple moving average; first `window - 1` points are NaN
pub fn rolling_mean(series: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; series.len()];
    if window == 0 || window > series.len() {
        return out;
    }

    for i in (window - 1)..series.len() {
        let slice = &series[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[i] = slice.iter().sum::<f64>() / window as f64;
    }
    out
}

/// Percentage change over a fixed lookback: `(v[t] - v[t-k]) / v[t-k] * 100`.
/// First `lookback` points are NaN, as is any point whose base value is zero.
pub fn pct_change(series: &[f64], lookback: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; series.len()];
    if lookback == 0 || lookback >= series.len() {
        return out;
    }

    for i in lookback..series.len() {
        let base = series[i - lookback];
        if base == 0.0 || base.is_nan() || series[i].is_nan() {
            continue;
        }
        out[i] = (series[i] - base) / base * 100.0;
    }
    out
}

/// Trailing min-max position on a 0-100 scale.
///
/// A flat window (max == min) yields exactly 50, the neutral midpoint,
/// never a division by zero; the gauge sits mid-scale through
/// flat-liquidity stretches.
pub fn rolling_minmax_normalize(series: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; series.len()];
    if window == 0 || window > series.len() {
        return out;
    }

    for i in (window - 1)..series.len() {
        let slice = &series[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        let min = slice.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        out[i] = if max == min {
            50.0
        } else {
            (series[i] - min) / (max - min) * 100.0
        };
    }
    out
}

/// Trailing Pearson correlation between two equal-length columns.
///
/// NaN for the first `window - 1` points and wherever either window has
/// zero variance. Symmetric in its arguments.
pub fn rolling_correlation(a: &[f64], b: &[f64], window: usize) -> Vec<f64> {
    let len = a.len().min(b.len());
    let mut out = vec![f64::NAN; len];
    if window < 2 || window > len {
        return out;
    }

    for i in (window - 1)..len {
        let wa = &a[i + 1 - window..=i];
        let wb = &b[i + 1 - window..=i];
        if wa.iter().chain(wb.iter()).any(|v| v.is_nan()) {
            continue;
        }

        let n = window as f64;
        let mean_a = wa.iter().sum::<f64>() / n;
        let mean_b = wb.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var_a = 0.0;
        let mut var_b = 0.0;
        for j in 0..window {
            let da = wa[j] - mean_a;
            let db = wb[j] - mean_b;
            cov += da * db;
            var_a += da * da;
            var_b += db * db;
        }

        if var_a > 0.0 && var_b > 0.0 {
            out[i] = cov / (var_a * var_b).sqrt();
        }
    }
    out
}
