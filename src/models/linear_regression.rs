//! Linear regression trend model

use crate::data::PriceSeries;
use crate::error::Result;
use crate::models::{validate_horizon, validate_min_len, ModelResult, TrendModel};
use serde_json::json;

/// Closed-form least-squares line fit over the day index
///
/// Fits `price ≈ slope·t + intercept` with `t` the integer day index
/// 0..n-1, then evaluates the same line at `t = n .. n+horizon-1` for the
/// forecast. No hyperparameters.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression;

impl LinearRegression {
    /// Create a new linear regression model
    pub fn new() -> Self {
        Self
    }
}

impl TrendModel for LinearRegression {
    fn name(&self) -> &str {
        "Linear Regression"
    }

    fn train(&self, data: &PriceSeries, horizon: usize) -> Result<ModelResult> {
        validate_horizon(horizon)?;
        let prices = data.close_prices();
        validate_min_len(self.name(), prices.len(), 2)?;

        let n = prices.len() as f64;
        let sum_t: f64 = (0..prices.len()).map(|t| t as f64).sum();
        let sum_y: f64 = prices.iter().sum();
        let sum_ty: f64 = prices.iter().enumerate().map(|(t, y)| t as f64 * y).sum();
        let sum_tt: f64 = (0..prices.len()).map(|t| (t as f64).powi(2)).sum();

        let slope = (n * sum_ty - sum_t * sum_y) / (n * sum_tt - sum_t * sum_t);
        let intercept = (sum_y - slope * sum_t) / n;

        let fitted: Vec<f64> = (0..prices.len())
            .map(|t| slope * t as f64 + intercept)
            .collect();

        let predictions: Vec<f64> = (prices.len()..prices.len() + horizon)
            .map(|t| slope * t as f64 + intercept)
            .collect();

        ModelResult::new(
            self.name(),
            &prices,
            fitted,
            predictions,
            horizon,
            json!({ "slope": slope, "intercept": intercept }),
        )
    }
}
