//! Forecasting
//!
//! Projects a fitted regression line forward. Confidence starts from the
//! fit quality and decays geometrically with the horizon; projected values
//! are clamped non-negative (KPI counts and amounts cannot go below zero).

use crate::regression::linear_regression;
use serde::{Deserialize, Serialize};

/// Per-step confidence decay factor
const CONFIDENCE_DECAY: f64 = 0.9;

/// One projected future value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Index on the input's time axis (first future index is `values.len()`)
    pub index: usize,
    /// Projected value, clamped to be non-negative
    pub value: f64,
    /// Confidence in [0, 1], decaying with the horizon
    pub confidence: f64,
}

/// Linear projection of a series into the future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Projected points, one per requested step
    pub points: Vec<ForecastPoint>,
    /// Slope of the underlying fit
    pub slope: f64,
    /// Confidence before horizon decay
    pub base_confidence: f64,
}

/// Base confidence from the fit: max(0.1, 1 − |std_error / slope|).
///
/// A zero slope makes the ratio undefined: a flat fit with zero residual
/// error is fully determined (confidence 1.0), while a flat fit with
/// residual error carries no usable trend (the 0.1 floor).
fn base_confidence(slope: f64, std_error: f64) -> f64 {
    if slope == 0.0 {
        if std_error == 0.0 { 1.0 } else { 0.1 }
    } else {
        (1.0 - (std_error / slope).abs()).max(0.1)
    }
}

/// Forecast `steps` future values by extending the least-squares fit.
///
/// Requires at least three samples; returns `None` otherwise.
pub fn forecast(values: &[f64], steps: usize) -> Option<Forecast> {
    if values.len() < 3 {
        return None;
    }
    let regression = linear_regression(values)?;

    let base = base_confidence(regression.slope, regression.std_error);
    let n = values.len();

    let points: Vec<ForecastPoint> = (0..steps)
        .map(|step| {
            let index = n + step;
            let value = (regression.slope * index as f64 + regression.intercept).max(0.0);
            let confidence = base * CONFIDENCE_DECAY.powi(step as i32);
            ForecastPoint {
                index,
                value,
                confidence,
            }
        })
        .collect();

    Some(Forecast {
        points,
        slope: regression.slope,
        base_confidence: base,
    })
}
