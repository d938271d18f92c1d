use assert_approx_eq::assert_approx_eq;
use rstest::rstest;
use trend_forecast::data::PriceSeries;
use trend_forecast::error::ForecastError;
use trend_forecast::models::arima::ArimaModel;
use trend_forecast::models::exponential_smoothing::HoltSmoothing;
use trend_forecast::models::knn::KnnRegression;
use trend_forecast::models::linear_regression::LinearRegression;
use trend_forecast::models::neural_network::NeuralNetwork;
use trend_forecast::models::polynomial_regression::PolynomialRegression;
use trend_forecast::models::TrendModel;

fn linear_series(n: usize, intercept: f64, slope: f64) -> PriceSeries {
    let closes: Vec<f64> = (0..n).map(|i| intercept + slope * i as f64).collect();
    PriceSeries::from_closes(&closes).unwrap()
}

fn deterministic_suite() -> Vec<Box<dyn TrendModel>> {
    vec![
        Box::new(LinearRegression::new()),
        Box::new(PolynomialRegression::default()),
        Box::new(HoltSmoothing::default()),
        Box::new(KnnRegression::default()),
        Box::new(ArimaModel::default()),
    ]
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(30)]
fn test_length_invariants(#[case] horizon: usize) {
    let series = linear_series(60, 100.0, 0.5);

    let mut suite = deterministic_suite();
    suite.push(Box::new(NeuralNetwork::default().with_seed(42)));

    for model in &suite {
        let result = model.train(&series, horizon).unwrap();
        assert_eq!(result.fitted.len(), series.len(), "{}", result.name);
        assert_eq!(result.predictions.len(), horizon, "{}", result.name);
        assert_eq!(
            result.final_prediction,
            *result.predictions.last().unwrap(),
            "{}",
            result.name
        );
    }
}

#[test]
fn test_zero_horizon_rejected() {
    let series = linear_series(60, 100.0, 0.5);

    for model in &deterministic_suite() {
        let result = model.train(&series, 0);
        assert!(matches!(result, Err(ForecastError::ValidationError(_))));
    }
}

#[test]
fn test_non_nn_models_are_deterministic() {
    let series = linear_series(80, 50.0, 1.25);

    for model in &deterministic_suite() {
        let first = model.train(&series, 14).unwrap();
        let second = model.train(&series, 14).unwrap();

        assert_eq!(first.fitted, second.fitted, "{}", first.name);
        assert_eq!(first.predictions, second.predictions, "{}", first.name);
    }
}

#[test]
fn test_linear_regression_perfect_line() {
    // y = 5 + 2t over 10 points
    let series = linear_series(10, 5.0, 2.0);
    let result = LinearRegression::new().train(&series, 7).unwrap();

    assert_approx_eq!(result.r2, 1.0, 1e-9);
    assert_approx_eq!(result.rmse, 0.0, 1e-9);
    // Forecast evaluates the same line at t = 10..16
    assert_approx_eq!(result.predictions[0], 25.0, 1e-9);
    assert_approx_eq!(result.final_prediction, 37.0, 1e-9);

    let slope = result.params["slope"].as_f64().unwrap();
    assert_approx_eq!(slope, 2.0, 1e-9);
}

#[test]
fn test_linear_regression_needs_two_points() {
    let series = PriceSeries::from_closes(&[100.0]).unwrap();
    let result = LinearRegression::new().train(&series, 5);

    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_polynomial_recovers_cubic() {
    let closes: Vec<f64> = (0..30)
        .map(|t| {
            let t = t as f64;
            10.0 + 2.0 * t - 0.5 * t * t + 0.01 * t * t * t
        })
        .collect();
    let series = PriceSeries::from_closes(&closes).unwrap();

    let result = PolynomialRegression::new(3).unwrap().train(&series, 5).unwrap();

    assert!(result.r2 > 0.999, "r2 = {}", result.r2);
    assert!(result.rmse < 0.1, "rmse = {}", result.rmse);
}

#[test]
fn test_holt_tracks_a_linear_trend_exactly() {
    // level/trend initialization makes Holt exact on a perfect line
    let series = PriceSeries::from_closes(&[10.0, 12.0, 14.0, 16.0, 18.0]).unwrap();
    let result = HoltSmoothing::default().train(&series, 3).unwrap();

    for (fitted, expected) in result.fitted.iter().zip([10.0, 12.0, 14.0, 16.0, 18.0]) {
        assert_approx_eq!(*fitted, expected, 1e-9);
    }
    assert_approx_eq!(result.predictions[0], 20.0, 1e-9);
    assert_approx_eq!(result.predictions[2], 24.0, 1e-9);
    assert_approx_eq!(result.r2, 1.0, 1e-9);
}

#[test]
fn test_holt_parameter_validation() {
    assert!(HoltSmoothing::new(0.0, 0.1).is_err());
    assert!(HoltSmoothing::new(0.3, 1.0).is_err());
    assert!(HoltSmoothing::new(0.3, 0.1).is_ok());
}

#[test]
fn test_knn_exact_duplicate_window() {
    // The query window [1,2,3,4,5] duplicates the first training window,
    // whose recorded target is 9; with k=1 the match is exact
    let closes = vec![1.0, 2.0, 3.0, 4.0, 5.0, 9.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let series = PriceSeries::from_closes(&closes).unwrap();

    let result = KnnRegression::new(1, 5).unwrap().train(&series, 1).unwrap();

    assert_eq!(result.predictions[0], 9.0);
}

#[test]
fn test_knn_fitted_prefix_is_raw() {
    let series = linear_series(30, 100.0, 1.0);
    let result = KnnRegression::default().train(&series, 3).unwrap();

    // First lookback slots carry the observed prices
    assert_eq!(&result.fitted[..5], &series.close_prices()[..5]);
}

#[test]
fn test_knn_parameter_validation() {
    assert!(KnnRegression::new(0, 5).is_err());
    assert!(KnnRegression::new(5, 0).is_err());
}

#[test]
fn test_neural_network_seeded_runs_match() {
    let series = linear_series(60, 100.0, 0.5);
    let model = NeuralNetwork::default().with_seed(1234);

    let first = model.train(&series, 7).unwrap();
    let second = model.train(&series, 7).unwrap();

    assert_eq!(first.fitted, second.fitted);
    assert_eq!(first.predictions, second.predictions);
}

#[test]
fn test_neural_network_parameter_validation() {
    assert!(NeuralNetwork::new(0, 10, 100, 0.01).is_err());
    assert!(NeuralNetwork::new(10, 10, 0, 0.01).is_err());
    assert!(NeuralNetwork::new(10, 10, 100, -0.5).is_err());
    assert!(NeuralNetwork::new(10, 10, 100, 0.01).is_ok());
}

#[test]
fn test_arima_constant_differences() {
    // On a perfect line every first difference is identical, so each
    // per-lag ratio estimates to exactly 1 and the AR recurrence compounds
    let series = linear_series(60, 100.0, 0.5);
    let result = ArimaModel::default().train(&series, 7).unwrap();

    let coefficients = result.params["ar_coefficients"].as_array().unwrap();
    for value in coefficients {
        assert_approx_eq!(value.as_f64().unwrap(), 1.0, 1e-9);
    }

    // The independently-estimated coefficients overshoot on trending data
    assert!(result.final_prediction > series.last_close());
}

#[test]
fn test_arima_insufficient_data() {
    let series = PriceSeries::from_closes(&[100.0, 101.0, 102.0]).unwrap();
    let result = ArimaModel::default().train(&series, 5);

    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_arima_order_validation() {
    assert!(ArimaModel::new(0, 1, 2).is_err());
    assert!(ArimaModel::new(5, 1, 2).is_ok());
}
