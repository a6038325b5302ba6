#![warn(missing_docs)]
//! Trendlens Statistical Engine
//!
//! Pure numeric analysis for KPI time series:
//! - Least-squares linear regression with fitted values and R²
//! - Z-score anomaly detection with severity grading
//! - Seasonal decomposition (trend / seasonal / residual)
//! - Pearson correlation and pairwise correlation matrices
//! - Linear forecasting with decaying confidence
//! - Cross-metric insight generation
//!
//! Every function is synchronous and side-effect free. Undersized inputs
//! yield `None` or an empty collection rather than an error, and no result
//! ever contains a non-finite number.

mod anomaly;
mod correlation;
mod forecast;
mod insight;
mod regression;
mod seasonal;
mod summary;

pub use anomaly::{Anomaly, Severity, detect_anomalies};
pub use correlation::{CorrelationKind, SeriesCorrelation, correlation_matrix, pearson};
pub use forecast::{Forecast, ForecastPoint, forecast};
pub use insight::{Impact, Insight, InsightDetail, TrendDirection, generate_insights};
pub use regression::{RegressionResult, linear_regression};
pub use seasonal::{SeasonalDecomposition, seasonal_decompose};
pub use summary::{SeriesSummary, compute_percentile, mean, population_std_dev, summarize};

use serde::{Deserialize, Serialize};

/// Default z-score threshold for anomaly detection
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// Default seasonal period (weekly cadence for daily samples)
pub const DEFAULT_SEASONAL_PERIOD: usize = 7;

/// Default number of future steps to forecast
pub const DEFAULT_FORECAST_STEPS: usize = 7;

/// A named KPI series: ordered samples where the array index is the time axis.
///
/// The math never needs explicit timestamps; callers that have them attach
/// them externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Metric name (e.g. "revenue", "active_users")
    pub name: String,
    /// Ordered sample values
    pub values: Vec<f64>,
}

impl MetricSeries {
    /// Create a named series from any iterable of samples
    pub fn new(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }
}
