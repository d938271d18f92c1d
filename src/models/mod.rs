//! Forecasting models for daily price series
//!
//! Each model independently consumes the same historical close series and
//! produces in-sample fitted values, an N-step-ahead forecast and
//! goodness-of-fit metrics. Models share the [`TrendModel`] contract so the
//! trainer can iterate over a suite of implementations.

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::metrics;
use serde::Serialize;
use std::fmt::Debug;

/// Training output of a single model
#[derive(Debug, Clone, Serialize)]
pub struct ModelResult {
    /// Model identifier
    pub name: String,
    /// In-sample fitted values, same length as the input series
    ///
    /// Slots where a model cannot produce an early fitted value (lookback or
    /// lag warm-up) are left-padded with the raw observed prices.
    pub fitted: Vec<f64>,
    /// Forecast values for day+1 .. day+horizon
    pub predictions: Vec<f64>,
    /// Forecast value at the full horizon
    pub final_prediction: f64,
    /// Coefficient of determination of the fitted values
    pub r2: f64,
    /// Root-mean-squared error of the fitted values
    pub rmse: f64,
    /// Model-specific hyperparameters and fitted coefficients
    pub params: serde_json::Value,
}

impl ModelResult {
    /// Assemble a result, validating lengths and scoring the fit
    pub fn new(
        name: impl Into<String>,
        actual: &[f64],
        fitted: Vec<f64>,
        predictions: Vec<f64>,
        horizon: usize,
        params: serde_json::Value,
    ) -> Result<Self> {
        if fitted.len() != actual.len() {
            return Err(ForecastError::ValidationError(format!(
                "Fitted length ({}) doesn't match series length ({})",
                fitted.len(),
                actual.len()
            )));
        }

        if predictions.len() != horizon || predictions.is_empty() {
            return Err(ForecastError::ValidationError(format!(
                "Predictions length ({}) doesn't match horizon ({})",
                predictions.len(),
                horizon
            )));
        }

        let final_prediction = predictions[predictions.len() - 1];
        let r2 = metrics::r_squared(actual, &fitted);
        let rmse = metrics::rmse(actual, &fitted);

        Ok(Self {
            name: name.into(),
            fitted,
            predictions,
            final_prediction,
            r2,
            rmse,
            params,
        })
    }
}

/// Common contract for the forecasting models
pub trait TrendModel: Debug {
    /// Get the name of the model
    fn name(&self) -> &str;

    /// Train on a price series and forecast `horizon` steps ahead
    fn train(&self, data: &PriceSeries, horizon: usize) -> Result<ModelResult>;
}

/// Validate the forecast horizon shared by all models
pub(crate) fn validate_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::ValidationError(
            "Forecast horizon must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a series carries enough observations for a model
pub(crate) fn validate_min_len(name: &str, len: usize, required: usize) -> Result<()> {
    if len < required {
        return Err(ForecastError::ValidationError(format!(
            "Insufficient data for {}. Need at least {} observations, got {}.",
            name, required, len
        )));
    }
    Ok(())
}

pub mod arima;
pub mod exponential_smoothing;
pub mod knn;
pub mod linear_regression;
pub mod neural_network;
pub mod polynomial_regression;
