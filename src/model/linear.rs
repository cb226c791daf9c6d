//! Ordinary least squares on the trailing window

use super::{FairValueFit, FairValueModel, ModelError};

/// Univariate OLS of price on liquidity.
///
/// The fit uses only the most recent `window` rows and requires strictly
/// more rows than that to exist, so a short history is reported instead of
/// fitted. Prediction and valuation gap cover the full input.
#[derive(Debug, Clone, Copy)]
pub struct LinearModel {
    window: usize,
}

impl LinearModel {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl FairValueModel for LinearModel {
    fn fit(&self, liquidity: &[f64], price: &[f64]) -> Result<FairValueFit, ModelError> {
        let len = liquidity.len().min(price.len());
        if len <= self.window {
            return Err(ModelError::InsufficientHistory {
                available: len,
                required: self.window,
            });
        }

        let x = &liquidity[len - self.window..len];
        let y = &price[len - self.window..len];
        let n = self.window as f64;

        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        for j in 0..self.window {
            let dx = x[j] - mean_x;
            cov += dx * (y[j] - mean_y);
            var_x += dx * dx;
        }

        if var_x == 0.0 {
            return Err(ModelError::DegenerateFit);
        }

        let slope = cov / var_x;
        let intercept = mean_y - slope * mean_x;

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for j in 0..self.window {
            let fitted = slope * x[j] + intercept;
            ss_res += (y[j] - fitted) * (y[j] - fitted);
            ss_tot += (y[j] - mean_y) * (y[j] - mean_y);
        }
        let r_squared = if ss_tot == 0.0 {
            f64::NAN
        } else {
            1.0 - ss_res / ss_tot
        };

        let predicted: Vec<f64> = liquidity[..len]
            .iter()
            .map(|l| slope * l + intercept)
            .collect();
        let gap_pct: Vec<f64> = predicted
            .iter()
            .zip(price[..len].iter())
            .map(|(pred, actual)| {
                if *pred == 0.0 || pred.is_nan() {
                    f64::NAN
                } else {
                    (actual - pred) / pred * 100.0
                }
            })
            .collect();

        Ok(FairValueFit {
            slope,
            intercept,
            r_squared,
            window: self.window,
            predicted,
            gap_pct,
        })
    }
}
