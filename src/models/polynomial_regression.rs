//! Polynomial regression trend model

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{validate_horizon, validate_min_len, ModelResult, TrendModel};
use crate::numerics::solve_linear_system;
use serde_json::json;

/// Polynomial fit via the normal equations
///
/// Builds the design matrix `[1, t, t², ..., t^degree]` over the day index
/// and solves `(XᵀX)β = Xᵀy` by Gaussian elimination. Extrapolation beyond
/// the training range is numerically unstable for long horizons or high
/// degrees; the instability is intentional — the ensemble discounts poor
/// fits through their R² weight. A singular system (fewer distinct indices
/// than coefficients) surfaces as this model's failure.
#[derive(Debug, Clone)]
pub struct PolynomialRegression {
    name: String,
    degree: usize,
}

impl PolynomialRegression {
    /// Create a new polynomial regression model of the given degree
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(ForecastError::InvalidParameter(
                "Polynomial degree must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Polynomial Regression (degree={})", degree),
            degree,
        })
    }

    fn evaluate(&self, coefficients: &[f64], t: f64) -> f64 {
        coefficients
            .iter()
            .enumerate()
            .map(|(power, c)| c * t.powi(power as i32))
            .sum()
    }
}

impl Default for PolynomialRegression {
    fn default() -> Self {
        Self {
            name: "Polynomial Regression (degree=3)".to_string(),
            degree: 3,
        }
    }
}

impl TrendModel for PolynomialRegression {
    fn name(&self) -> &str {
        &self.name
    }

    fn train(&self, data: &PriceSeries, horizon: usize) -> Result<ModelResult> {
        validate_horizon(horizon)?;
        let prices = data.close_prices();
        validate_min_len(self.name(), prices.len(), self.degree + 1)?;

        let design: Vec<Vec<f64>> = (0..prices.len())
            .map(|t| {
                (0..=self.degree)
                    .map(|power| (t as f64).powi(power as i32))
                    .collect()
            })
            .collect();

        let coefficients = solve_linear_system(&design, &prices)?;

        let fitted: Vec<f64> = (0..prices.len())
            .map(|t| self.evaluate(&coefficients, t as f64))
            .collect();

        let predictions: Vec<f64> = (prices.len()..prices.len() + horizon)
            .map(|t| self.evaluate(&coefficients, t as f64))
            .collect();

        ModelResult::new(
            self.name(),
            &prices,
            fitted,
            predictions,
            horizon,
            json!({ "degree": self.degree, "coefficients": coefficients }),
        )
    }
}
