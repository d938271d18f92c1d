//! Feed-forward neural network trend model

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{validate_horizon, validate_min_len, ModelResult, TrendModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// Single-hidden-layer network over a normalized price window
///
/// Prices are min-max normalized to [0, 1] over the full training series;
/// the input is a window of `lookback` normalized prices, feeding a hidden
/// ReLU layer and a single linear output unit. Training runs per-sample
/// gradient steps for `epochs` passes.
///
/// The backward pass updates only the hidden→output weights and the output
/// bias; the input→hidden layer keeps its random initialization throughout.
/// This reproduces the source engine's behavior — the hidden layer acts as a
/// fixed random feature map, and the ensemble's R² weighting discounts the
/// model when those features fit poorly. Fix a `seed` for reproducible runs.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    name: String,
    lookback: usize,
    hidden: usize,
    epochs: usize,
    learning_rate: f64,
    seed: Option<u64>,
}

impl NeuralNetwork {
    /// Create a new network with explicit hyperparameters
    pub fn new(lookback: usize, hidden: usize, epochs: usize, learning_rate: f64) -> Result<Self> {
        if lookback == 0 || hidden == 0 {
            return Err(ForecastError::InvalidParameter(
                "Lookback and hidden size must be at least 1".to_string(),
            ));
        }
        if epochs == 0 {
            return Err(ForecastError::InvalidParameter(
                "Epoch count must be at least 1".to_string(),
            ));
        }
        if learning_rate <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Learning rate must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Neural Network (lookback={}, hidden={})", lookback, hidden),
            lookback,
            hidden,
            epochs,
            learning_rate,
            seed: None,
        })
    }

    /// Fix the random seed for weight initialization
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for NeuralNetwork {
    fn default() -> Self {
        Self {
            name: "Neural Network (lookback=10, hidden=10)".to_string(),
            lookback: 10,
            hidden: 10,
            epochs: 100,
            learning_rate: 0.01,
            seed: None,
        }
    }
}

/// Network weights plus the normalization bounds they were trained under
#[derive(Debug)]
struct Network {
    input_weights: Vec<Vec<f64>>,
    hidden_biases: Vec<f64>,
    output_weights: Vec<f64>,
    output_bias: f64,
    min: f64,
    max: f64,
}

impl Network {
    fn init(lookback: usize, hidden: usize, min: f64, max: f64, rng: &mut StdRng) -> Self {
        let input_weights = (0..hidden)
            .map(|_| (0..lookback).map(|_| rng.gen_range(-0.5..0.5)).collect())
            .collect();
        let hidden_biases = (0..hidden).map(|_| rng.gen_range(-0.5..0.5)).collect();
        let output_weights = (0..hidden).map(|_| rng.gen_range(-0.5..0.5)).collect();
        let output_bias = rng.gen_range(-0.5..0.5);

        Self {
            input_weights,
            hidden_biases,
            output_weights,
            output_bias,
            min,
            max,
        }
    }

    fn normalize(&self, price: f64) -> f64 {
        (price - self.min) / (self.max - self.min)
    }

    fn denormalize(&self, value: f64) -> f64 {
        value * (self.max - self.min) + self.min
    }

    /// Forward pass over a normalized window, returning hidden activations
    /// and the output
    fn forward(&self, window: &[f64]) -> (Vec<f64>, f64) {
        let hidden: Vec<f64> = self
            .input_weights
            .iter()
            .zip(self.hidden_biases.iter())
            .map(|(weights, bias)| {
                let sum: f64 = weights.iter().zip(window.iter()).map(|(w, x)| w * x).sum();
                (sum + bias).max(0.0)
            })
            .collect();

        let output = self
            .output_weights
            .iter()
            .zip(hidden.iter())
            .map(|(w, h)| w * h)
            .sum::<f64>()
            + self.output_bias;

        (hidden, output)
    }

    /// Gradient step on the output layer only
    fn update_output_layer(&mut self, hidden: &[f64], error: f64, learning_rate: f64) {
        for (weight, activation) in self.output_weights.iter_mut().zip(hidden.iter()) {
            *weight -= learning_rate * error * activation;
        }
        self.output_bias -= learning_rate * error;
    }
}

impl TrendModel for NeuralNetwork {
    fn name(&self) -> &str {
        &self.name
    }

    fn train(&self, data: &PriceSeries, horizon: usize) -> Result<ModelResult> {
        validate_horizon(horizon)?;
        let prices = data.close_prices();
        validate_min_len(self.name(), prices.len(), self.lookback + 1)?;

        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut network = Network::init(self.lookback, self.hidden, min, max, &mut rng);

        let normalized: Vec<f64> = prices.iter().map(|&p| network.normalize(p)).collect();

        for _ in 0..self.epochs {
            for i in 0..normalized.len() - self.lookback {
                let window = &normalized[i..i + self.lookback];
                let target = normalized[i + self.lookback];

                let (hidden, output) = network.forward(window);
                let error = output - target;
                network.update_output_layer(&hidden, error, self.learning_rate);
            }
        }

        // First lookback points have no computable fitted value
        let mut fitted = prices[..self.lookback].to_vec();
        for i in self.lookback..normalized.len() {
            let (_, output) = network.forward(&normalized[i - self.lookback..i]);
            fitted.push(network.denormalize(output));
        }

        // Recursive multi-step forecast in normalized space
        let mut window = normalized[normalized.len() - self.lookback..].to_vec();
        let mut predictions = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let (_, output) = network.forward(&window);
            predictions.push(network.denormalize(output));
            window.remove(0);
            window.push(output);
        }

        ModelResult::new(
            self.name(),
            &prices,
            fitted,
            predictions,
            horizon,
            json!({
                "lookback": self.lookback,
                "hidden": self.hidden,
                "epochs": self.epochs,
                "learning_rate": self.learning_rate,
                "seed": self.seed,
            }),
        )
    }
}
