//! Pearson Correlation
//!
//! Pairwise linear correlation between named series. Unequal lengths are
//! truncated to the shorter series; degenerate inputs (fewer than two
//! overlapping samples, zero variance) correlate as 0 rather than NaN.

use crate::MetricSeries;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Sign of a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationKind {
    /// r > 0
    Positive,
    /// r ≤ 0
    Negative,
}

impl std::fmt::Display for CorrelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationKind::Positive => write!(f, "positive"),
            CorrelationKind::Negative => write!(f, "negative"),
        }
    }
}

/// Correlation between one unordered pair of named series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesCorrelation {
    /// Name of the first series (earlier in input order)
    pub first: String,
    /// Name of the second series
    pub second: String,
    /// Pearson coefficient in [−1, 1]
    pub coefficient: f64,
    /// |coefficient|
    pub strength: f64,
    /// Sign classification
    pub kind: CorrelationKind,
}

/// Pearson correlation coefficient between two series.
///
/// Truncates to the shorter length. Returns 0.0 for fewer than two
/// overlapping samples or when either series has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let x = &x[..n];
    let y = &y[..n];

    let nf = n as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = nf * sum_xy - sum_x * sum_y;
    let denominator = ((nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Correlate every unordered pair of distinct series.
///
/// Pairs follow input order (`(a, b)` is emitted once, never `(b, a)`), and
/// the output order is deterministic regardless of the parallel execution
/// underneath.
pub fn correlation_matrix(series: &[MetricSeries]) -> Vec<SeriesCorrelation> {
    let mut pairs = Vec::new();
    for i in 0..series.len() {
        for j in (i + 1)..series.len() {
            pairs.push((i, j));
        }
    }

    pairs
        .par_iter()
        .map(|&(i, j)| {
            let r = pearson(&series[i].values, &series[j].values);
            SeriesCorrelation {
                first: series[i].name.clone(),
                second: series[j].name.clone(),
                coefficient: r,
                strength: r.abs(),
                kind: if r > 0.0 {
                    CorrelationKind::Positive
                } else {
                    CorrelationKind::Negative
                },
            }
        })
        .collect()
}
