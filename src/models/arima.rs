//! Simplified ARIMA trend model

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{validate_horizon, validate_min_len, ModelResult, TrendModel};
use serde_json::json;

/// AR-only ARIMA approximation
///
/// Applies first-order differencing `d` times, then estimates each AR
/// coefficient independently as the scalar least-squares ratio
/// `Σ(x_t·x_{t-lag}) / Σ(x_{t-lag}²)` — not a joint multivariate fit, so
/// cross-lag correlation is ignored. Forecasts iterate the AR recurrence on
/// the differenced series and re-integrate by cumulative sum from the last
/// observed values. The `q` order is carried for reporting but no MA
/// component is implemented.
#[derive(Debug, Clone)]
pub struct ArimaModel {
    name: String,
    p: usize,
    d: usize,
    q: usize,
}

impl ArimaModel {
    /// Create a new ARIMA(p, d, q) model
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p == 0 {
            return Err(ForecastError::InvalidParameter(
                "AR order p must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("ARIMA({},{},{})", p, d, q),
            p,
            d,
            q,
        })
    }

    /// First-order difference of a series
    fn difference(series: &[f64]) -> Vec<f64> {
        series.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Per-lag independent AR coefficient estimates
    fn estimate_coefficients(&self, diffed: &[f64]) -> Vec<f64> {
        (1..=self.p)
            .map(|lag| {
                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for t in lag..diffed.len() {
                    numerator += diffed[t] * diffed[t - lag];
                    denominator += diffed[t - lag] * diffed[t - lag];
                }
                numerator / denominator
            })
            .collect()
    }

    /// One AR step over the tail of a differenced history
    fn ar_step(&self, coefficients: &[f64], history: &[f64]) -> f64 {
        (0..self.p)
            .map(|j| coefficients[j] * history[history.len() - 1 - j])
            .sum()
    }
}

impl Default for ArimaModel {
    fn default() -> Self {
        Self {
            name: "ARIMA(5,1,2)".to_string(),
            p: 5,
            d: 1,
            q: 2,
        }
    }
}

impl TrendModel for ArimaModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn train(&self, data: &PriceSeries, horizon: usize) -> Result<ModelResult> {
        validate_horizon(horizon)?;
        let prices = data.close_prices();
        validate_min_len(self.name(), prices.len(), self.p + self.d + 1)?;

        // levels[0] is the raw series, levels[k] its k-fold difference
        let mut levels: Vec<Vec<f64>> = vec![prices.clone()];
        for _ in 0..self.d {
            let next = Self::difference(&levels[levels.len() - 1]);
            levels.push(next);
        }
        let diffed = levels[self.d].clone();

        let coefficients = self.estimate_coefficients(&diffed);

        // One-step-ahead fitted values on the level series; the first p + d
        // slots have no computable fitted value
        let warmup = (self.p + self.d).min(prices.len());
        let mut fitted = prices[..warmup].to_vec();
        for i in warmup..prices.len() {
            let t = i - self.d;
            let dhat = self.ar_step(&coefficients, &diffed[..t]);

            // Reconstruct the level prediction from the actual history at
            // each differencing level
            let mut prediction = prices[i - 1] + dhat;
            for k in 1..self.d {
                prediction += levels[k][i - 1 - k];
            }
            fitted.push(prediction);
        }

        // Iterate the AR recurrence on the differenced series
        let mut history = diffed;
        let mut forecasts = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let next = self.ar_step(&coefficients, &history);
            history.push(next);
            forecasts.push(next);
        }

        // Re-integrate by cumulative sum from the last observed value at
        // each differencing level
        for k in (0..self.d).rev() {
            let mut last = levels[k][levels[k].len() - 1];
            forecasts = forecasts
                .iter()
                .map(|&diff| {
                    last += diff;
                    last
                })
                .collect();
        }

        ModelResult::new(
            self.name(),
            &prices,
            fitted,
            forecasts,
            horizon,
            json!({
                "p": self.p,
                "d": self.d,
                "q": self.q,
                "ar_coefficients": coefficients,
            }),
        )
    }
}
