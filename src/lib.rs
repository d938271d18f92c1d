//! # Trend Forecast
//!
//! A Rust library for multi-model trend prediction over daily price series.
//!
//! ## Features
//!
//! - Price series handling (OHLCV bars, CSV loading, synthetic fallback data)
//! - Six independent forecasting models: linear regression, polynomial
//!   regression, Holt's exponential smoothing, k-nearest-neighbors, a small
//!   feed-forward neural network, and a simplified AR-only ARIMA
//! - Shared numerics (normal-equation solve, distances) and fit metrics
//!   (R², RMSE)
//! - A sequential training orchestrator producing one result per model
//! - A weighted ensemble forecast with a spread interval and trade signal
//!
//! ## Quick Start
//!
//! ```rust
//! use trend_forecast::data::PriceSeries;
//! use trend_forecast::ensemble;
//! use trend_forecast::training::Trainer;
//!
//! # fn main() -> trend_forecast::Result<()> {
//! // A strongly trending series
//! let closes: Vec<f64> = (0..120).map(|i| 100.0 + 0.5 * i as f64).collect();
//! let series = PriceSeries::from_closes(&closes)?;
//!
//! // Train the default six-model suite for a 7-day horizon
//! let trainer = Trainer::with_defaults(7)?;
//! let run = trainer.train(&series);
//!
//! // Combine the surviving models into a consensus forecast
//! let forecast = ensemble::aggregate(&run.results, series.last_close())?;
//! println!("{} ({:+.2}%)", forecast.signal, forecast.change_percent);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod ensemble;
pub mod error;
pub mod metrics;
pub mod models;
pub mod numerics;
pub mod training;

// Re-export commonly used types
pub use crate::data::{DataLoader, DataOrigin, PriceBar, PriceSeries, Quote};
pub use crate::ensemble::{EnsembleForecast, TradeSignal};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{ModelResult, TrendModel};
pub use crate::training::{Trainer, TrainingRun};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
