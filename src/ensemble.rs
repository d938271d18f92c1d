//! Ensemble aggregation of model forecasts
//!
//! Pure functions over a collection of [`ModelResult`]s: a weighted-average
//! consensus forecast, a spread-based interval, and a categorical trade
//! signal derived from the predicted percentage move.

use crate::error::{ForecastError, Result};
use crate::models::ModelResult;
use crate::numerics::{mean, population_std_dev};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Interval confidence level used for the spread band
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Categorical trading signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSignal {
    /// Predicted move of +5% or more
    StrongBuy,
    /// Predicted move of +2% to +5%
    Buy,
    /// Predicted move within ±2%
    Hold,
    /// Predicted move of -2% to -5%
    Sell,
    /// Predicted move of -5% or more
    StrongSell,
}

impl TradeSignal {
    /// Map a predicted percentage change to a signal
    ///
    /// Outer bounds are inclusive: exactly +5% is StrongBuy, exactly +2% is
    /// Buy, and symmetrically -2% is Sell, -5% is StrongSell.
    pub fn from_change_percent(change_percent: f64) -> Self {
        if change_percent >= 5.0 {
            TradeSignal::StrongBuy
        } else if change_percent >= 2.0 {
            TradeSignal::Buy
        } else if change_percent > -2.0 {
            TradeSignal::Hold
        } else if change_percent > -5.0 {
            TradeSignal::Sell
        } else {
            TradeSignal::StrongSell
        }
    }

    /// Strength label for the signal
    pub fn strength(&self) -> SignalStrength {
        match self {
            TradeSignal::StrongBuy | TradeSignal::StrongSell => SignalStrength::Strong,
            TradeSignal::Buy | TradeSignal::Sell => SignalStrength::Moderate,
            TradeSignal::Hold => SignalStrength::Neutral,
        }
    }
}

impl std::fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TradeSignal::StrongBuy => "STRONG BUY",
            TradeSignal::Buy => "BUY",
            TradeSignal::Hold => "HOLD",
            TradeSignal::Sell => "SELL",
            TradeSignal::StrongSell => "STRONG SELL",
        };
        write!(f, "{}", label)
    }
}

/// Strength label attached to a trade signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    /// Strong conviction (outer signal bands)
    Strong,
    /// Moderate conviction
    Moderate,
    /// No directional conviction
    Neutral,
}

/// Agreement band across the individual model forecasts
///
/// Derived from the coefficient of variation of the final predictions: a
/// low spread means the models agree, a high spread calls for caution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consensus {
    /// Spread below 3%
    Tight,
    /// Spread between 3% and 7%
    Moderate,
    /// Spread above 7%
    Wide,
}

impl Consensus {
    /// Classify a prediction spread percentage
    pub fn from_spread(spread_percent: f64) -> Self {
        if spread_percent < 3.0 {
            Consensus::Tight
        } else if spread_percent <= 7.0 {
            Consensus::Moderate
        } else {
            Consensus::Wide
        }
    }
}

/// Consensus forecast combined from the individual model results
#[derive(Debug, Clone, Serialize)]
pub struct EnsembleForecast {
    /// Weighted-average final prediction
    pub prediction: f64,
    /// Spread interval `[lower, upper]` around the mean prediction
    ///
    /// Labelled 95% but derived from the cross-model spread, not a
    /// statistical sampling distribution.
    pub interval: (f64, f64),
    /// Confidence level the interval width corresponds to
    pub confidence_level: f64,
    /// Average R² across all models, negatives included
    pub average_r2: f64,
    /// Predicted percentage change versus the current price
    pub change_percent: f64,
    /// Derived trading signal
    pub signal: TradeSignal,
    /// Strength label of the signal
    pub strength: SignalStrength,
    /// Coefficient of variation of the final predictions, in percent
    pub spread_percent: f64,
    /// Agreement band for the spread
    pub consensus: Consensus,
}

/// Combine model results into a single ensemble forecast
///
/// Weight per model is its R² floored at zero, so a model that fits worse
/// than the mean contributes nothing to the weighted forecast (a NaN R²
/// also collapses to zero under `f64::max`). Models with zero weight still
/// count toward the average R², the interval and the spread. When every
/// weight is zero the forecast falls back to the unweighted mean.
pub fn aggregate(results: &[ModelResult], current_price: f64) -> Result<EnsembleForecast> {
    if results.is_empty() {
        return Err(ForecastError::ValidationError(
            "Ensemble needs at least one model result".to_string(),
        ));
    }
    if current_price <= 0.0 {
        return Err(ForecastError::ValidationError(
            "Current price must be positive".to_string(),
        ));
    }

    let finals: Vec<f64> = results.iter().map(|r| r.final_prediction).collect();
    let weights: Vec<f64> = results.iter().map(|r| r.r2.max(0.0)).collect();
    let weight_sum: f64 = weights.iter().sum();

    let prediction = if weight_sum > 0.0 {
        finals
            .iter()
            .zip(weights.iter())
            .map(|(value, weight)| value * weight)
            .sum::<f64>()
            / weight_sum
    } else {
        mean(&finals)
    };

    let spread_mean = mean(&finals);
    let spread_std = population_std_dev(&finals);
    let z = standard_normal_z(CONFIDENCE_LEVEL)?;
    let interval = (spread_mean - z * spread_std, spread_mean + z * spread_std);

    let average_r2 = mean(&results.iter().map(|r| r.r2).collect::<Vec<f64>>());
    let spread_percent = spread_std / spread_mean.abs() * 100.0;

    let change_percent = (prediction - current_price) / current_price * 100.0;
    let signal = TradeSignal::from_change_percent(change_percent);

    Ok(EnsembleForecast {
        prediction,
        interval,
        confidence_level: CONFIDENCE_LEVEL,
        average_r2,
        change_percent,
        signal,
        strength: signal.strength(),
        spread_percent,
        consensus: Consensus::from_spread(spread_percent),
    })
}

/// Two-sided z-value for a confidence level under the standard normal
fn standard_normal_z(confidence_level: f64) -> Result<f64> {
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(ForecastError::ValidationError(
            "Confidence level must be between 0 and 1".to_string(),
        ));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::MathError(format!("Standard normal: {}", e)))?;
    Ok(normal.inverse_cdf(0.5 + confidence_level / 2.0))
}
