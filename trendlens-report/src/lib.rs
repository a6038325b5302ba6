//! Trendlens Report
//!
//! Assembles the full analysis suite (summary, trend, anomalies, seasonal,
//! forecast, correlations, insights) into a timestamped, schema-versioned
//! report and renders it as JSON. This is the workspace's observability
//! surface: results leave the engine through here.

mod json;
mod report;

pub use json::generate_json_report;
pub use report::{
    AnalysisReport, MetricReport, REPORT_SCHEMA_VERSION, ReportMeta, ReportOptions, build_report,
};
