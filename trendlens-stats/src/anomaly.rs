//! Anomaly Detection
//!
//! Flags samples whose z-score against the series mean exceeds a threshold.
//! Uses the population standard deviation (divide by N): the series is the
//! whole population under analysis. A zero-variance series has no defined
//! z-scores and therefore no anomalies.

use crate::summary::{mean, population_std_dev};
use serde::{Deserialize, Serialize};

/// Severity grade assigned from the absolute z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// |z| ≤ 2 (only reachable with a threshold below 2)
    Low,
    /// 2 < |z| ≤ 2.5
    Medium,
    /// 2.5 < |z| ≤ 3
    High,
    /// |z| > 3
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Grade an absolute z-score into a severity band.
fn grade_severity(z_score: f64) -> Severity {
    if z_score > 3.0 {
        Severity::Critical
    } else if z_score > 2.5 {
        Severity::High
    } else if z_score > 2.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// One sample flagged as anomalous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Position of the sample in the input series
    pub index: usize,
    /// The sample value
    pub value: f64,
    /// Absolute z-score: |value − mean| / std_dev
    pub z_score: f64,
    /// Deviation from the mean as a percentage of the mean; 0.0 when the mean is 0
    pub deviation_pct: f64,
    /// Severity band for the z-score
    pub severity: Severity,
}

/// Detect anomalies in a series.
///
/// Returns every sample whose absolute z-score exceeds `threshold`.
/// Fewer than three samples, or a constant series (zero standard
/// deviation), yields no anomalies rather than NaN classifications.
pub fn detect_anomalies(values: &[f64], threshold: f64) -> Vec<Anomaly> {
    if values.len() < 3 {
        return Vec::new();
    }

    let m = mean(values);
    let std_dev = population_std_dev(values);
    if std_dev == 0.0 {
        return Vec::new();
    }

    values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let z_score = (value - m).abs() / std_dev;
            if z_score <= threshold {
                return None;
            }
            let deviation_pct = if m == 0.0 {
                0.0
            } else {
                (value - m) / m * 100.0
            };
            Some(Anomaly {
                index,
                value,
                z_score,
                deviation_pct,
                severity: grade_severity(z_score),
            })
        })
        .collect()
}
