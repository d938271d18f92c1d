//! Dense linear algebra and statistics primitives shared by the models
//!
//! All routines operate on `f64` and are pure functions. Matrix arguments use
//! row-major `Vec<Vec<f64>>`; shape compatibility is the caller's
//! responsibility and is checked with assertions.

use crate::error::{ForecastError, Result};

/// Transpose a dense matrix
pub fn transpose(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if matrix.is_empty() {
        return Vec::new();
    }

    let rows = matrix.len();
    let cols = matrix[0].len();
    let mut result = vec![vec![0.0; rows]; cols];

    for (i, row) in matrix.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            result[j][i] = value;
        }
    }

    result
}

/// Multiply two dense matrices
pub fn matrix_multiply(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    assert!(!a.is_empty() && !b.is_empty(), "matrices must be non-empty");
    assert_eq!(a[0].len(), b.len(), "inner dimensions must match");

    let rows = a.len();
    let inner = b.len();
    let cols = b[0].len();
    let mut result = vec![vec![0.0; cols]; rows];

    for i in 0..rows {
        for k in 0..inner {
            let aik = a[i][k];
            for j in 0..cols {
                result[i][j] += aik * b[k][j];
            }
        }
    }

    result
}

/// Multiply a dense matrix by a column vector
pub fn matrix_vector_multiply(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| {
            assert_eq!(row.len(), vector.len(), "row length must match vector");
            row.iter().zip(vector.iter()).map(|(m, v)| m * v).sum()
        })
        .collect()
}

/// Solve the least-squares system for a design matrix and target vector
///
/// Forms the normal equations `(XᵀX) β = Xᵀy` and solves them by Gaussian
/// elimination with partial pivoting. Returns a `MathError` when the system
/// is singular, e.g. when there are fewer distinct x-values than
/// coefficients.
pub fn solve_linear_system(design: &[Vec<f64>], target: &[f64]) -> Result<Vec<f64>> {
    assert_eq!(design.len(), target.len(), "one target per design row");

    let xt = transpose(design);
    let mut a = matrix_multiply(&xt, design);
    let mut b = matrix_vector_multiply(&xt, target);
    let n = a.len();

    // Forward elimination with partial pivoting
    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_mag = a[col][col].abs();
        for row in col + 1..n {
            let mag = a[row][col].abs();
            if mag > pivot_mag {
                pivot_row = row;
                pivot_mag = mag;
            }
        }

        if pivot_mag < 1e-12 || !pivot_mag.is_finite() {
            return Err(ForecastError::MathError(
                "Singular matrix in linear system solve".to_string(),
            ));
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut solution = vec![0.0; n];
    for col in (0..n).rev() {
        let mut value = b[col];
        for k in col + 1..n {
            value -= a[col][k] * solution[k];
        }
        solution[col] = value / a[col][col];
    }

    Ok(solution)
}

/// Euclidean distance between two equal-length vectors
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "vectors must have equal length");

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Arithmetic mean of a slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation of a slice
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}
