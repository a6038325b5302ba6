#![warn(missing_docs)]
//! # Trendlens
//!
//! KPI analytics engine for dashboard time series: pure statistics behind a
//! message-passing worker and an id-keyed client facade.
//!
//! - **Statistics**: linear regression, z-score anomaly detection, seasonal
//!   decomposition, Pearson correlation, linear forecasting, and
//!   cross-metric insight generation, all pure functions that never return
//!   non-finite numbers
//! - **Background dispatch**: a worker thread drains a command channel and
//!   answers with id-tagged replies; panics and unknown operations become
//!   structured failures, never a dead worker
//! - **Id-keyed facade**: any number of concurrent in-flight requests,
//!   resolved by request id regardless of reply order, with
//!   deadline-bounded waits
//! - **Reports**: the full analysis suite assembled into a timestamped
//!   JSON document
//!
//! ## Quick Start
//!
//! ```no_run
//! use trendlens::prelude::*;
//!
//! # fn main() -> Result<(), trendlens::EngineError> {
//! let engine = AnalyticsEngine::spawn()?;
//!
//! let pending = engine.analyze_trend(&[10.0, 12.0, 14.5, 15.9, 18.2]);
//! match pending.wait()? {
//!     AnalysisResult::Trend(Some(fit)) => println!("slope {:.2}", fit.slope),
//!     _ => println!("series too short"),
//! }
//!
//! engine.shutdown();
//! # Ok(())
//! # }
//! ```

// Re-export statistics
pub use trendlens_stats::{
    Anomaly, DEFAULT_ANOMALY_THRESHOLD, DEFAULT_FORECAST_STEPS, DEFAULT_SEASONAL_PERIOD, Forecast,
    ForecastPoint, Impact, Insight, InsightDetail, MetricSeries, RegressionResult,
    SeasonalDecomposition, SeriesCorrelation, SeriesSummary, Severity, TrendDirection,
    correlation_matrix, detect_anomalies, forecast, generate_insights, linear_regression, pearson,
    seasonal_decompose, summarize,
};

// Re-export the message contract
pub use trendlens_proto::{
    AnalysisParams, AnalysisPayload, AnalysisRequest, AnalysisResult, EngineCommand, EngineReply,
    Operation, RequestId, UNKNOWN_OPERATION,
};

// Re-export the engine
pub use trendlens_engine::{
    AnalysisOutcome, AnalyticsEngine, AnalyticsWorker, EngineConfig, EngineError, PendingAnalysis,
};

// Re-export reporting
pub use trendlens_report::{AnalysisReport, ReportOptions, build_report, generate_json_report};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AnalysisParams, AnalysisPayload, AnalysisResult, AnalyticsEngine, EngineConfig,
        MetricSeries, Operation, PendingAnalysis, build_report, generate_json_report,
    };
}
