//! Price series data handling for model training
//!
//! The models in this crate consume an immutable, chronologically ascending
//! sequence of daily bars. Bars can be loaded from CSV, built directly from
//! closing prices, or generated as a synthetic random walk when no real data
//! source is available.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// OHLCV data for a single trading day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    /// Timestamp of the bar
    pub timestamp: DateTime<Utc>,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Volume
    pub volume: u64,
}

/// Current quote for a symbol
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quote {
    /// Last traded price
    pub price: f64,
    /// Absolute change versus the previous close
    pub change: f64,
    /// Percentage change versus the previous close
    pub change_percent: f64,
}

/// Where a price series came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    /// Real market data
    Live,
    /// Synthetic fallback data (random walk)
    Synthetic,
}

/// Immutable, chronologically ascending series of daily price bars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
    origin: DataOrigin,
}

impl PriceSeries {
    /// Create a new price series from bars, validating chronological order
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        Self::with_origin(bars, DataOrigin::Live)
    }

    /// Create a new price series with an explicit data origin
    pub fn with_origin(bars: Vec<PriceBar>, origin: DataOrigin) -> Result<Self> {
        if bars.is_empty() {
            return Err(ForecastError::DataError(
                "Price series must contain at least one bar".to_string(),
            ));
        }

        for pair in bars.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(ForecastError::DataError(format!(
                    "Bars must be chronologically ascending: {} follows {}",
                    pair[1].timestamp, pair[0].timestamp
                )));
            }
        }

        Ok(Self { bars, origin })
    }

    /// Build a daily series from closing prices alone
    ///
    /// Open/high/low are set to the close and volume to a nominal constant.
    /// Intended for tests and hosts that only track closes.
    pub fn from_closes(closes: &[f64]) -> Result<Self> {
        if closes.is_empty() {
            return Err(ForecastError::DataError(
                "Cannot build a series from an empty close list".to_string(),
            ));
        }

        let base = base_date();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                timestamp: base + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect();

        Self::new(bars)
    }

    /// Get the underlying bars
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Get the closing prices as a vector
    pub fn close_prices(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Get the most recent closing price
    pub fn last_close(&self) -> f64 {
        self.bars[self.bars.len() - 1].close
    }

    /// Number of bars in the series
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Data origin of the series
    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// Whether the series is synthetic fallback data
    pub fn is_synthetic(&self) -> bool {
        self.origin == DataOrigin::Synthetic
    }

    /// Trim the series to the trailing training window
    ///
    /// Months are counted as 30 days, matching the host's 3/6/12/24-month
    /// window options.
    pub fn trailing_months(&self, months: u32) -> Result<Self> {
        if months == 0 {
            return Err(ForecastError::InvalidParameter(
                "Training window must be at least one month".to_string(),
            ));
        }

        let last = self.bars[self.bars.len() - 1].timestamp;
        let cutoff = last - Duration::days(30 * months as i64);
        let bars: Vec<PriceBar> = self
            .bars
            .iter()
            .filter(|bar| bar.timestamp >= cutoff)
            .cloned()
            .collect();

        Self::with_origin(bars, self.origin)
    }

    /// Derive a current quote from the last two closes
    pub fn to_quote(&self) -> Quote {
        let price = self.last_close();
        if self.bars.len() < 2 {
            return Quote {
                price,
                change: 0.0,
                change_percent: 0.0,
            };
        }

        let previous = self.bars[self.bars.len() - 2].close;
        Quote {
            price,
            change: price - previous,
            change_percent: (price - previous) / previous * 100.0,
        }
    }
}

/// CSV row layout expected by the loader
#[derive(Debug, Deserialize)]
struct CsvBar {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Data loader for price series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a price series from a CSV file
    ///
    /// Expects a header row with `timestamp,open,high,low,close,volume`
    /// columns. Timestamps may be RFC 3339 or plain `YYYY-MM-DD` dates.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut bars = Vec::new();

        for record in reader.deserialize() {
            let row: CsvBar = record?;
            bars.push(PriceBar {
                timestamp: parse_timestamp(&row.timestamp)?,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        PriceSeries::new(bars)
    }

    /// Load a price series from CSV, falling back to synthetic data
    ///
    /// When the file cannot be read or parsed, a synthetic random walk of
    /// `days` bars is substituted so model training always has input. The
    /// fallback is logged and detectable via [`PriceSeries::is_synthetic`].
    pub fn from_csv_or_synthetic<P: AsRef<Path>>(path: P, days: usize) -> Result<PriceSeries> {
        match Self::from_csv(&path) {
            Ok(series) => Ok(series),
            Err(err) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %err,
                    "Falling back to synthetic price data"
                );
                synthetic_series(100.0, days, 0.02, None)
            }
        }
    }
}

/// Generate a synthetic daily random-walk series
///
/// Each close moves by a Gaussian return with the given volatility; highs and
/// lows are jittered around the open/close range. A fixed `seed` makes the
/// series reproducible.
pub fn synthetic_series(
    start_price: f64,
    days: usize,
    volatility: f64,
    seed: Option<u64>,
) -> Result<PriceSeries> {
    if days == 0 {
        return Err(ForecastError::InvalidParameter(
            "Synthetic series needs at least one day".to_string(),
        ));
    }
    if start_price <= 0.0 {
        return Err(ForecastError::InvalidParameter(
            "Start price must be positive".to_string(),
        ));
    }
    if volatility < 0.0 {
        return Err(ForecastError::InvalidParameter(
            "Volatility must be non-negative".to_string(),
        ));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let returns = Normal::new(0.0, volatility)
        .map_err(|e| ForecastError::InvalidParameter(format!("Bad volatility: {}", e)))?;

    let base = base_date();
    let mut bars = Vec::with_capacity(days);
    let mut current = start_price;

    for i in 0..days {
        let open = current;
        let close = open * (1.0 + returns.sample(&mut rng));
        let high = open.max(close) * (1.0 + rng.gen::<f64>() * volatility * 0.5);
        let low = open.min(close) * (1.0 - rng.gen::<f64>() * volatility * 0.5);
        let volume = rng.gen_range(1000..10000);

        bars.push(PriceBar {
            timestamp: base + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        });

        current = close;
    }

    PriceSeries::with_origin(bars, DataOrigin::Synthetic)
}

fn base_date() -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(2023, 1, 1)
        .expect("valid base date")
        .and_hms_opt(0, 0, 0)
        .expect("valid base time");
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let naive = NaiveDateTime::new(date, chrono::NaiveTime::default());
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    Err(ForecastError::DataError(format!(
        "Unrecognized timestamp format: '{}'",
        raw
    )))
}
