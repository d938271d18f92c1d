//! Goodness-of-fit metrics for model evaluation

use serde::{Deserialize, Serialize};

/// Coefficient of determination (R²) of predictions against actual values
///
/// `1 - SS_res / SS_tot`. Can be negative when the predictions fit worse
/// than the mean, and is NaN when the actual series is constant
/// (`SS_tot = 0`). Neither case is guarded here; the ensemble's weight
/// formula floors both at zero.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len(), "series must have equal length");

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    1.0 - ss_res / ss_tot
}

/// Root-mean-squared error of predictions against actual values
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len(), "series must have equal length");

    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;

    mse.sqrt()
}

/// Mean absolute error of predictions against actual values
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len(), "series must have equal length");

    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// In-sample fit metrics for one model
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitReport {
    /// Coefficient of determination
    pub r2: f64,
    /// Root-mean-squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
}

impl FitReport {
    /// Compute all fit metrics for a fitted series against actual values
    pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Self {
        Self {
            r2: r_squared(actual, predicted),
            rmse: rmse(actual, predicted),
            mae: mean_absolute_error(actual, predicted),
        }
    }
}

impl std::fmt::Display for FitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fit Metrics:")?;
        writeln!(f, "  R2:    {:.4}", self.r2)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        Ok(())
    }
}
