//! Linear Regression
//!
//! Ordinary least squares over an index-ordered series: the sample position
//! (0, 1, 2, ...) is the X variable, the sample value is Y.

use serde::{Deserialize, Serialize};

/// Result of fitting a least-squares line to a series.
///
/// Immutable once computed; `predictions[i]` is the fitted value at index `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Change in value per index step
    pub slope: f64,
    /// Fitted value at index 0
    pub intercept: f64,
    /// Coefficient of determination, fraction of variance explained
    pub r_squared: f64,
    /// Residual standard error, sqrt(SSres / (n−2)); 0.0 when n ≤ 2 (exact fit)
    pub std_error: f64,
    /// Fitted value per input index, same length as the input
    pub predictions: Vec<f64>,
}

/// Fit a least-squares line through `(index, value)` pairs.
///
/// Returns `None` for fewer than two samples, or if the normal-equation
/// denominator is zero (cannot happen for index-based X, guarded anyway).
/// A constant series fits its flat line exactly, so `r_squared` is 1.0
/// there rather than the indeterminate 0/0.
pub fn linear_regression(values: &[f64]) -> Option<RegressionResult> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let sum_x = (n * (n - 1)) as f64 / 2.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..n).map(|i| (i as f64) * (i as f64)).sum();

    let denominator = nf * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / nf;

    let predictions: Vec<f64> = (0..n).map(|i| slope * i as f64 + intercept).collect();

    let mean_y = sum_y / nf;
    let ss_total: f64 = values.iter().map(|y| (y - mean_y).powi(2)).sum();
    let ss_residual: f64 = values
        .iter()
        .zip(&predictions)
        .map(|(y, fitted)| (y - fitted).powi(2))
        .sum();

    let r_squared = if ss_total == 0.0 {
        1.0
    } else {
        1.0 - ss_residual / ss_total
    };

    let std_error = if n > 2 {
        (ss_residual / (nf - 2.0)).sqrt()
    } else {
        0.0
    };

    Some(RegressionResult {
        slope,
        intercept,
        r_squared,
        std_error,
        predictions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_line() {
        let result = linear_regression(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert!((result.slope - 1.0).abs() < 1e-9);
        assert!((result.intercept - 1.0).abs() < 1e-9);
        assert!((result.r_squared - 1.0).abs() < 1e-9);
        assert!(result.std_error < 1e-9);
    }

    #[test]
    fn test_predictions_length_matches_input() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let result = linear_regression(&values).unwrap();
        assert_eq!(result.predictions.len(), values.len());
    }

    #[test]
    fn test_r_squared_bounds() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let result = linear_regression(&values).unwrap();
        assert!(result.r_squared >= -1e-9);
        assert!(result.r_squared <= 1.0 + 1e-9);
    }

    #[test]
    fn test_constant_series_is_exact_fit() {
        let result = linear_regression(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert!((result.slope - 0.0).abs() < 1e-12);
        assert!((result.intercept - 5.0).abs() < 1e-12);
        assert!((result.r_squared - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_points_exact() {
        let result = linear_regression(&[1.0, 3.0]).unwrap();
        assert!((result.slope - 2.0).abs() < 1e-12);
        // n−2 divisor is undefined at n=2; the fit is exact so error is zero
        assert!((result.std_error - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_too_few_samples() {
        assert!(linear_regression(&[]).is_none());
        assert!(linear_regression(&[7.0]).is_none());
    }

    #[test]
    fn test_results_are_finite() {
        let result = linear_regression(&[0.0, 0.0, 1e9, -1e9, 0.5]).unwrap();
        assert!(result.slope.is_finite());
        assert!(result.intercept.is_finite());
        assert!(result.r_squared.is_finite());
        assert!(result.std_error.is_finite());
        assert!(result.predictions.iter().all(|p| p.is_finite()));
    }
}
