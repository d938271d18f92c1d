use pretty_assertions::assert_eq;
use std::io::Write;
use trend_forecast::data::{synthetic_series, DataLoader, DataOrigin, PriceSeries};
use trend_forecast::error::ForecastError;

#[test]
fn test_from_closes() {
    let closes = vec![100.0, 101.0, 102.5];
    let series = PriceSeries::from_closes(&closes).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.close_prices(), closes);
    assert_eq!(series.last_close(), 102.5);
    assert_eq!(series.origin(), DataOrigin::Live);
    assert!(!series.is_synthetic());
}

#[test]
fn test_empty_series_rejected() {
    let result = PriceSeries::from_closes(&[]);
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_non_ascending_bars_rejected() {
    let series = PriceSeries::from_closes(&[100.0, 101.0]).unwrap();
    let mut bars = series.bars().to_vec();
    bars.swap(0, 1);

    let result = PriceSeries::new(bars);
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_trailing_months_trims_window() {
    // 400 daily bars, trailing 3 months keeps the last 30*3 days plus the
    // cutoff bar itself
    let closes: Vec<f64> = (0..400).map(|i| 100.0 + i as f64).collect();
    let series = PriceSeries::from_closes(&closes).unwrap();

    let trimmed = series.trailing_months(3).unwrap();

    assert_eq!(trimmed.len(), 91);
    assert_eq!(trimmed.last_close(), series.last_close());

    let result = series.trailing_months(0);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn test_quote_from_series() {
    let series = PriceSeries::from_closes(&[100.0, 110.0]).unwrap();
    let quote = series.to_quote();

    assert_eq!(quote.price, 110.0);
    assert_eq!(quote.change, 10.0);
    assert_eq!(quote.change_percent, 10.0);
}

#[test]
fn test_csv_round_trip() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "timestamp,open,high,low,close,volume").unwrap();
    writeln!(file, "2023-01-01,100.0,101.5,99.0,101.0,5000").unwrap();
    writeln!(file, "2023-01-02,101.0,103.0,100.5,102.5,6000").unwrap();
    file.flush().unwrap();

    let series = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.close_prices(), vec![101.0, 102.5]);
    assert_eq!(series.bars()[0].volume, 5000);
    assert_eq!(series.origin(), DataOrigin::Live);
}

#[test]
fn test_csv_fallback_is_synthetic_and_detectable() {
    let series = DataLoader::from_csv_or_synthetic("/definitely/not/a/file.csv", 120).unwrap();

    assert_eq!(series.len(), 120);
    assert!(series.is_synthetic());
    assert_eq!(series.origin(), DataOrigin::Synthetic);
}

#[test]
fn test_synthetic_series_is_seeded() {
    let a = synthetic_series(100.0, 50, 0.02, Some(7)).unwrap();
    let b = synthetic_series(100.0, 50, 0.02, Some(7)).unwrap();

    assert_eq!(a.close_prices(), b.close_prices());
    assert!(a.close_prices().iter().all(|&p| p > 0.0));
}

#[test]
fn test_synthetic_series_validation() {
    assert!(synthetic_series(100.0, 0, 0.02, None).is_err());
    assert!(synthetic_series(-5.0, 10, 0.02, None).is_err());
    assert!(synthetic_series(100.0, 10, -0.1, None).is_err());
}
