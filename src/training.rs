//! Sequential training orchestrator
//!
//! Trains every model in a suite against the same price series and horizon,
//! collecting one [`ModelResult`] per succeeding model. A model that fails
//! (e.g. a singular matrix in the polynomial fit) is reported as a failure
//! for that slot only; nothing is substituted in its place. Each run returns
//! a fresh immutable [`TrainingRun`] — re-training for a new symbol, horizon
//! or window is simply another call.

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::arima::ArimaModel;
use crate::models::exponential_smoothing::HoltSmoothing;
use crate::models::knn::KnnRegression;
use crate::models::linear_regression::LinearRegression;
use crate::models::neural_network::NeuralNetwork;
use crate::models::polynomial_regression::PolynomialRegression;
use crate::models::{ModelResult, TrendModel};
use tracing::{debug, warn};

/// A model slot that failed to train
#[derive(Debug)]
pub struct ModelFailure {
    /// Name of the failed model
    pub model: String,
    /// The error it produced
    pub error: ForecastError,
}

/// Immutable outcome of one training run
#[derive(Debug)]
pub struct TrainingRun {
    /// Forecast horizon the run was trained for
    pub horizon: usize,
    /// Results of the models that trained successfully
    pub results: Vec<ModelResult>,
    /// Models that failed, with their errors
    pub failures: Vec<ModelFailure>,
}

/// The standard six-model suite with default hyperparameters
pub fn default_suite() -> Vec<Box<dyn TrendModel>> {
    vec![
        Box::new(LinearRegression::new()),
        Box::new(PolynomialRegression::default()),
        Box::new(HoltSmoothing::default()),
        Box::new(KnnRegression::default()),
        Box::new(NeuralNetwork::default()),
        Box::new(ArimaModel::default()),
    ]
}

/// The standard suite with a seeded neural network, for reproducible runs
pub fn suite_with_seed(seed: u64) -> Vec<Box<dyn TrendModel>> {
    vec![
        Box::new(LinearRegression::new()),
        Box::new(PolynomialRegression::default()),
        Box::new(HoltSmoothing::default()),
        Box::new(KnnRegression::default()),
        Box::new(NeuralNetwork::default().with_seed(seed)),
        Box::new(ArimaModel::default()),
    ]
}

/// Trains a suite of models sequentially on a shared input
#[derive(Debug)]
pub struct Trainer {
    models: Vec<Box<dyn TrendModel>>,
    horizon: usize,
}

impl Trainer {
    /// Create a trainer over an explicit model suite
    pub fn new(models: Vec<Box<dyn TrendModel>>, horizon: usize) -> Result<Self> {
        if horizon == 0 {
            return Err(ForecastError::ValidationError(
                "Forecast horizon must be at least 1".to_string(),
            ));
        }
        if models.is_empty() {
            return Err(ForecastError::ValidationError(
                "Trainer needs at least one model".to_string(),
            ));
        }

        Ok(Self { models, horizon })
    }

    /// Create a trainer over the default six-model suite
    pub fn with_defaults(horizon: usize) -> Result<Self> {
        Self::new(default_suite(), horizon)
    }

    /// Forecast horizon this trainer was configured with
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Train every model against the series, collecting results and failures
    pub fn train(&self, data: &PriceSeries) -> TrainingRun {
        let mut results = Vec::with_capacity(self.models.len());
        let mut failures = Vec::new();

        for model in &self.models {
            match model.train(data, self.horizon) {
                Ok(result) => {
                    debug!(
                        model = model.name(),
                        r2 = result.r2,
                        rmse = result.rmse,
                        final_prediction = result.final_prediction,
                        "Model trained"
                    );
                    results.push(result);
                }
                Err(error) => {
                    warn!(model = model.name(), error = %error, "Model training failed");
                    failures.push(ModelFailure {
                        model: model.name().to_string(),
                        error,
                    });
                }
            }
        }

        TrainingRun {
            horizon: self.horizon,
            results,
            failures,
        }
    }
}
