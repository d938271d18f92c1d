use assert_approx_eq::assert_approx_eq;
use trend_forecast::data::PriceSeries;
use trend_forecast::ensemble::{aggregate, TradeSignal};
use trend_forecast::training::{suite_with_seed, Trainer};

/// End-to-end run over a strongly trending series: train the full suite,
/// aggregate, and check the consensus leans with the trend.
#[test]
fn test_end_to_end_trending_series() {
    // 180 points of 100 + 0.5·i
    let closes: Vec<f64> = (0..180).map(|i| 100.0 + 0.5 * i as f64).collect();
    let series = PriceSeries::from_closes(&closes).unwrap();

    let trainer = Trainer::new(suite_with_seed(42), 7).unwrap();
    let run = trainer.train(&series);

    assert!(run.failures.is_empty(), "failures: {:?}", run.failures);
    assert_eq!(run.results.len(), 6);
    assert_eq!(run.horizon, 7);

    for result in &run.results {
        assert_eq!(result.fitted.len(), series.len(), "{}", result.name);
        assert_eq!(result.predictions.len(), 7, "{}", result.name);
    }

    // The line evaluated at t = 186
    let linear = run
        .results
        .iter()
        .find(|r| r.name == "Linear Regression")
        .unwrap();
    assert_approx_eq!(linear.final_prediction, 100.0 + 0.5 * 186.0, 1e-6);
    assert_approx_eq!(linear.r2, 1.0, 1e-9);

    let forecast = aggregate(&run.results, series.last_close()).unwrap();
    assert!(forecast.prediction > series.last_close());
    assert!(
        matches!(forecast.signal, TradeSignal::Buy | TradeSignal::StrongBuy),
        "signal was {:?} at {:+.2}%",
        forecast.signal,
        forecast.change_percent
    );
}

/// Re-training with the same inputs reproduces the same outputs when the
/// neural network seed is pinned.
#[test]
fn test_training_run_is_idempotent_with_seed() {
    let closes: Vec<f64> = (0..90).map(|i| 200.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.2).collect();
    let series = PriceSeries::from_closes(&closes).unwrap();

    let trainer = Trainer::new(suite_with_seed(7), 14).unwrap();
    let first = trainer.train(&series);
    let second = trainer.train(&series);

    assert_eq!(first.results.len(), second.results.len());
    for (a, b) in first.results.iter().zip(second.results.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.predictions, b.predictions, "{}", a.name);
        assert_eq!(a.fitted, b.fitted, "{}", a.name);
    }
}

/// A short series fails the window models but the rest of the suite still
/// trains; failures are reported per slot, not substituted.
#[test]
fn test_partial_failures_are_isolated() {
    // 8 points: enough for linear/polynomial/Holt/KNN and ARIMA(5,1,2),
    // but below the neural network's lookback of 10
    let closes = vec![100.0, 101.0, 103.0, 102.0, 104.0, 105.0, 107.0, 106.0];
    let series = PriceSeries::from_closes(&closes).unwrap();

    let trainer = Trainer::new(suite_with_seed(1), 5).unwrap();
    let run = trainer.train(&series);

    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.results.len(), 5);
    assert!(run.failures[0].model.starts_with("Neural Network"));

    // The ensemble aggregates over the survivors
    let forecast = aggregate(&run.results, series.last_close()).unwrap();
    assert!(forecast.prediction.is_finite());
}

#[test]
fn test_trainer_validation() {
    assert!(Trainer::with_defaults(0).is_err());
    assert!(Trainer::new(Vec::new(), 7).is_err());
}
