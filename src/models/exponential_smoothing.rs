//! Holt's linear exponential smoothing model

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{validate_horizon, validate_min_len, ModelResult, TrendModel};
use serde_json::json;

/// Holt's linear method (double exponential smoothing)
///
/// Maintains a smoothed `level` and `trend`, initialized from the first two
/// observations. The fitted value at step i is the one-step-ahead forecast
/// made at step i-1; the forecast extrapolates the final level and trend
/// linearly with no damping.
#[derive(Debug, Clone)]
pub struct HoltSmoothing {
    name: String,
    alpha: f64,
    beta: f64,
}

impl HoltSmoothing {
    /// Create a new Holt smoothing model
    ///
    /// `alpha` smooths the level and `beta` the trend; both must lie in
    /// (0, 1).
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        if beta <= 0.0 || beta >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Beta must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Exponential Smoothing (alpha={}, beta={})", alpha, beta),
            alpha,
            beta,
        })
    }
}

impl Default for HoltSmoothing {
    fn default() -> Self {
        Self {
            name: "Exponential Smoothing (alpha=0.3, beta=0.1)".to_string(),
            alpha: 0.3,
            beta: 0.1,
        }
    }
}

impl TrendModel for HoltSmoothing {
    fn name(&self) -> &str {
        &self.name
    }

    fn train(&self, data: &PriceSeries, horizon: usize) -> Result<ModelResult> {
        validate_horizon(horizon)?;
        let prices = data.close_prices();
        validate_min_len(self.name(), prices.len(), 2)?;

        let mut level = prices[0];
        let mut trend = prices[1] - prices[0];

        let mut fitted = Vec::with_capacity(prices.len());
        // No prior forecast exists for the first observation
        fitted.push(prices[0]);

        for &price in &prices[1..] {
            // One-step-ahead forecast from the previous state
            fitted.push(level + trend);

            let new_level = self.alpha * price + (1.0 - self.alpha) * (level + trend);
            let new_trend = self.beta * (new_level - level) + (1.0 - self.beta) * trend;
            level = new_level;
            trend = new_trend;
        }

        let predictions: Vec<f64> = (1..=horizon)
            .map(|h| level + h as f64 * trend)
            .collect();

        ModelResult::new(
            self.name(),
            &prices,
            fitted,
            predictions,
            horizon,
            json!({
                "alpha": self.alpha,
                "beta": self.beta,
                "level": level,
                "trend": trend,
            }),
        )
    }
}
