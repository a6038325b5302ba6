//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trendlens_stats::{
    Anomaly, Forecast, Insight, MetricSeries, RegressionResult, SeasonalDecomposition,
    SeriesCorrelation, SeriesSummary, correlation_matrix, detect_anomalies, forecast,
    generate_insights, linear_regression, seasonal_decompose, summarize,
};

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Complete analysis report over a batch of metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub meta: ReportMeta,
    pub metrics: Vec<MetricReport>,
    pub correlations: Vec<SeriesCorrelation>,
    pub insights: Vec<Insight>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub options: ReportOptions,
}

/// Parameters the report was generated with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Z-score threshold for the anomaly section
    pub anomaly_threshold: f64,
    /// Period for the seasonal section
    pub seasonal_period: usize,
    /// Horizon for the forecast section
    pub forecast_steps: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            anomaly_threshold: trendlens_stats::DEFAULT_ANOMALY_THRESHOLD,
            seasonal_period: trendlens_stats::DEFAULT_SEASONAL_PERIOD,
            forecast_steps: trendlens_stats::DEFAULT_FORECAST_STEPS,
        }
    }
}

/// Everything computed for one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricReport {
    pub name: String,
    pub summary: SeriesSummary,
    /// Absent when the series is too short to fit
    pub trend: Option<RegressionResult>,
    pub anomalies: Vec<Anomaly>,
    /// Absent without two full seasonal cycles
    pub seasonal: Option<SeasonalDecomposition>,
    /// Absent when the series is too short to project
    pub forecast: Option<Forecast>,
}

/// Run the full analysis suite over a batch of metrics and assemble a report.
///
/// Metric sections appear in input order; sections that need more data than
/// a series has are simply absent rather than failing the whole report.
pub fn build_report(metrics: &[MetricSeries], options: &ReportOptions) -> AnalysisReport {
    let metric_reports = metrics
        .iter()
        .map(|metric| MetricReport {
            name: metric.name.clone(),
            summary: summarize(&metric.values),
            trend: linear_regression(&metric.values),
            anomalies: detect_anomalies(&metric.values, options.anomaly_threshold),
            seasonal: seasonal_decompose(&metric.values, options.seasonal_period),
            forecast: forecast(&metric.values, options.forecast_steps),
        })
        .collect();

    AnalysisReport {
        meta: ReportMeta {
            schema_version: REPORT_SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            options: options.clone(),
        },
        metrics: metric_reports,
        correlations: correlation_matrix(metrics),
        insights: generate_insights(metrics),
    }
}
