//! K-nearest-neighbors trend model

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{validate_horizon, validate_min_len, ModelResult, TrendModel};
use crate::numerics::euclidean_distance;
use serde_json::json;

/// Nearest-neighbor regression over sliding price windows
///
/// Builds (window of `lookback` consecutive prices → next price) training
/// pairs from the history. A query window is matched against all pairs by
/// Euclidean distance and the prediction is the unweighted mean of the `k`
/// nearest targets. Multi-step forecasts feed each prediction back into the
/// window.
#[derive(Debug, Clone)]
pub struct KnnRegression {
    name: String,
    k: usize,
    lookback: usize,
}

/// One training pair: a price window and the price that followed it
#[derive(Debug, Clone)]
struct TrainingPair {
    window: Vec<f64>,
    target: f64,
}

impl KnnRegression {
    /// Create a new KNN model with `k` neighbors and a window of `lookback`
    pub fn new(k: usize, lookback: usize) -> Result<Self> {
        if k == 0 {
            return Err(ForecastError::InvalidParameter(
                "Neighbor count k must be at least 1".to_string(),
            ));
        }
        if lookback == 0 {
            return Err(ForecastError::InvalidParameter(
                "Lookback window must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("KNN (k={}, lookback={})", k, lookback),
            k,
            lookback,
        })
    }

    fn build_pairs(&self, prices: &[f64]) -> Vec<TrainingPair> {
        (0..prices.len() - self.lookback)
            .map(|i| TrainingPair {
                window: prices[i..i + self.lookback].to_vec(),
                target: prices[i + self.lookback],
            })
            .collect()
    }

    /// Predict the next price for a query window
    ///
    /// Ties in distance keep their sort order; no distance weighting.
    fn predict_next(&self, pairs: &[TrainingPair], query: &[f64]) -> f64 {
        let mut distances: Vec<(f64, f64)> = pairs
            .iter()
            .map(|pair| (euclidean_distance(&pair.window, query), pair.target))
            .collect();
        distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let neighbors = &distances[..self.k.min(distances.len())];
        neighbors.iter().map(|(_, target)| target).sum::<f64>() / neighbors.len() as f64
    }
}

impl Default for KnnRegression {
    fn default() -> Self {
        Self {
            name: "KNN (k=5, lookback=5)".to_string(),
            k: 5,
            lookback: 5,
        }
    }
}

impl TrendModel for KnnRegression {
    fn name(&self) -> &str {
        &self.name
    }

    fn train(&self, data: &PriceSeries, horizon: usize) -> Result<ModelResult> {
        validate_horizon(horizon)?;
        let prices = data.close_prices();
        validate_min_len(self.name(), prices.len(), self.lookback + 1)?;

        let pairs = self.build_pairs(&prices);

        // First lookback points have no computable fitted value
        let mut fitted = prices[..self.lookback].to_vec();
        for i in self.lookback..prices.len() {
            fitted.push(self.predict_next(&pairs, &prices[i - self.lookback..i]));
        }

        // Recursive multi-step forecast with an evolving sliding window
        let mut window = prices[prices.len() - self.lookback..].to_vec();
        let mut predictions = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let next = self.predict_next(&pairs, &window);
            predictions.push(next);
            window.remove(0);
            window.push(next);
        }

        ModelResult::new(
            self.name(),
            &prices,
            fitted,
            predictions,
            horizon,
            json!({ "k": self.k, "lookback": self.lookback }),
        )
    }
}
