//! Insight Generation
//!
//! Turns a batch of named metrics into human-readable findings: one trend
//! insight per metric, one insight per detected anomaly, and one next-value
//! prediction. Metrics are processed in input order, and within a metric
//! the order is trend, anomalies, prediction, so a given input always
//! produces the same output sequence.

use crate::anomaly::{Severity, detect_anomalies};
use crate::forecast::forecast;
use crate::regression::linear_regression;
use crate::{DEFAULT_ANOMALY_THRESHOLD, MetricSeries};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Slope magnitude below which a trend counts as stable
const STABLE_SLOPE: f64 = 0.01;

/// Slope magnitudes bounding the impact bands for trend insights
const HIGH_IMPACT_SLOPE: f64 = 0.1;
const MEDIUM_IMPACT_SLOPE: f64 = 0.05;

/// Forecast confidence above which a prediction is high impact
const HIGH_CONFIDENCE: f64 = 0.8;

/// How much a finding should matter to a dashboard viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Routine movement
    Low,
    /// Worth a look
    Medium,
    /// Needs attention
    High,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Low => write!(f, "low"),
            Impact::Medium => write!(f, "medium"),
            Impact::High => write!(f, "high"),
        }
    }
}

/// Direction of a fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Slope above +0.01
    Increasing,
    /// Slope below −0.01
    Decreasing,
    /// Slope within ±0.01
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// The statistic behind an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InsightDetail {
    /// Direction and steepness of the fitted trend
    Trend {
        /// Classified direction
        direction: TrendDirection,
        /// Fitted slope per interval
        slope: f64,
        /// Fit quality
        r_squared: f64,
    },
    /// A sample flagged by anomaly detection
    Anomaly {
        /// Position in the series
        index: usize,
        /// The anomalous value
        value: f64,
        /// Absolute z-score
        z_score: f64,
        /// Severity band
        severity: Severity,
    },
    /// Projected next value
    Prediction {
        /// Projected value for the next interval
        value: f64,
        /// Confidence of the projection
        confidence: f64,
    },
}

/// One finding about one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Name of the metric the finding is about
    pub metric: String,
    /// The underlying statistic
    pub detail: InsightDetail,
    /// Impact classification
    pub impact: Impact,
    /// Human-readable one-liner
    pub description: String,
}

/// Generate insights for a batch of metrics.
///
/// Metrics with fewer than three samples are skipped. Output order is
/// deterministic: metrics in input order; within a metric, the trend
/// insight, then anomaly insights by index, then the prediction.
pub fn generate_insights(metrics: &[MetricSeries]) -> Vec<Insight> {
    metrics
        .par_iter()
        .map(metric_insights)
        .collect::<Vec<Vec<Insight>>>()
        .into_iter()
        .flatten()
        .collect()
}

fn metric_insights(metric: &MetricSeries) -> Vec<Insight> {
    let mut insights = Vec::new();
    if metric.values.len() < 3 {
        return insights;
    }

    if let Some(regression) = linear_regression(&metric.values) {
        let direction = if regression.slope > STABLE_SLOPE {
            TrendDirection::Increasing
        } else if regression.slope < -STABLE_SLOPE {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };
        let impact = if regression.slope.abs() > HIGH_IMPACT_SLOPE {
            Impact::High
        } else if regression.slope.abs() > MEDIUM_IMPACT_SLOPE {
            Impact::Medium
        } else {
            Impact::Low
        };
        insights.push(Insight {
            metric: metric.name.clone(),
            description: format!(
                "{} is {} at {:+.3} per interval (r\u{b2} {:.2})",
                metric.name, direction, regression.slope, regression.r_squared
            ),
            detail: InsightDetail::Trend {
                direction,
                slope: regression.slope,
                r_squared: regression.r_squared,
            },
            impact,
        });
    }

    for anomaly in detect_anomalies(&metric.values, DEFAULT_ANOMALY_THRESHOLD) {
        let impact = match anomaly.severity {
            Severity::Critical | Severity::High => Impact::High,
            Severity::Medium => Impact::Medium,
            Severity::Low => Impact::Low,
        };
        insights.push(Insight {
            metric: metric.name.clone(),
            description: format!(
                "{}[{}] = {:.2} deviates {:+.1}% from the mean (z {:.2}, {})",
                metric.name,
                anomaly.index,
                anomaly.value,
                anomaly.deviation_pct,
                anomaly.z_score,
                anomaly.severity
            ),
            detail: InsightDetail::Anomaly {
                index: anomaly.index,
                value: anomaly.value,
                z_score: anomaly.z_score,
                severity: anomaly.severity,
            },
            impact,
        });
    }

    if let Some(projection) = forecast(&metric.values, 1) {
        if let Some(next) = projection.points.first() {
            let impact = if next.confidence > HIGH_CONFIDENCE {
                Impact::High
            } else {
                Impact::Medium
            };
            insights.push(Insight {
                metric: metric.name.clone(),
                description: format!(
                    "{} is predicted to reach {:.2} next interval ({:.0}% confidence)",
                    metric.name,
                    next.value,
                    next.confidence * 100.0
                ),
                detail: InsightDetail::Prediction {
                    value: next.value,
                    confidence: next.confidence,
                },
                impact,
            });
        }
    }

    insights
}
