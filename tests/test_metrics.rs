use assert_approx_eq::assert_approx_eq;
use trend_forecast::metrics::{mean_absolute_error, r_squared, rmse, FitReport};

#[test]
fn test_perfect_fit() {
    let actual = vec![10.0, 20.0, 30.0, 40.0];
    let predicted = actual.clone();

    assert_approx_eq!(r_squared(&actual, &predicted), 1.0);
    assert_approx_eq!(rmse(&actual, &predicted), 0.0);
    assert_approx_eq!(mean_absolute_error(&actual, &predicted), 0.0);
}

#[test]
fn test_known_errors() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    assert_approx_eq!(mean_absolute_error(&actual, &predicted), 2.4, 0.01);
    assert_approx_eq!(rmse(&actual, &predicted), 2.449, 0.01);
    assert!(r_squared(&actual, &predicted) > 0.9);
}

#[test]
fn test_r_squared_can_be_negative() {
    // Predicting far from the data is worse than predicting the mean
    let actual = vec![1.0, 2.0, 3.0];
    let predicted = vec![10.0, 10.0, 10.0];

    assert!(r_squared(&actual, &predicted) < 0.0);
}

#[test]
fn test_r_squared_constant_actual_is_nan() {
    // SS_tot is zero for a constant series; the edge case surfaces as NaN
    let actual = vec![5.0, 5.0, 5.0];
    let predicted = vec![5.0, 5.0, 5.0];

    assert!(r_squared(&actual, &predicted).is_nan());
}

#[test]
fn test_fit_report() {
    let actual = vec![10.0, 20.0, 30.0];
    let predicted = vec![11.0, 19.0, 31.0];

    let report = FitReport::evaluate(&actual, &predicted);

    assert_approx_eq!(report.mae, 1.0);
    assert_approx_eq!(report.rmse, 1.0);
    assert!(report.r2 > 0.95);

    let rendered = format!("{}", report);
    assert!(rendered.contains("RMSE"));
}
