//! Fair value model
//!
//! Estimates what the index "should" trade at given the liquidity level,
//! by refitting a univariate regression over a trailing window.

mod linear;

pub use linear::LinearModel;

use thiserror::Error;

/// Why a fit was not produced. Surfaced explicitly: a window with too few
/// observations must never degrade into a quiet fit on whatever is there.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("insufficient history: {available} rows, need more than {required}")]
    InsufficientHistory { available: usize, required: usize },
    #[error("degenerate fit: liquidity has no variance in the fit window")]
    DegenerateFit,
}

/// A fitted price-on-liquidity regression applied to the full series
#[derive(Debug, Clone, PartialEq)]
pub struct FairValueFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination over the fit window
    pub r_squared: f64,
    /// Rows used for the fit (the trailing window)
    pub window: usize,
    /// Predicted price for every row of the input series
    pub predicted: Vec<f64>,
    /// Percentage deviation of actual from predicted price, per row
    pub gap_pct: Vec<f64>,
}

impl FairValueFit {
    /// Valuation gap at the most recent row
    pub fn latest_gap(&self) -> f64 {
        self.gap_pct.last().copied().unwrap_or(f64::NAN)
    }
}

/// Trait seam for fair value implementations
pub trait FairValueModel: Send + Sync {
    /// Fit on the trailing window of the paired series and predict over
    /// the whole of it
    fn fit(&self, liquidity: &[f64], price: &[f64]) -> Result<FairValueFit, ModelError>;
}
