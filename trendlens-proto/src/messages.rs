//! Request and Reply Types
//!
//! The command/reply pairing mirrors a supervisor-worker protocol: the
//! facade sends `EngineCommand`s, the worker answers with `EngineReply`s.
//! Transport is an in-process channel, so messages are plain typed values
//! with no wire framing.

use serde::{Deserialize, Serialize};
use trendlens_stats::{
    Anomaly, Forecast, Insight, MetricSeries, RegressionResult, SeasonalDecomposition,
    SeriesCorrelation,
};

/// Error text returned for an operation name the dispatcher does not know.
pub const UNKNOWN_OPERATION: &str = "Unknown analysis type";

/// Process-unique request identifier assigned by the client facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(
    /// Raw counter value
    pub u64,
);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// The recognized analysis operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Linear regression over a single series
    AnalyzeTrend,
    /// Z-score anomaly detection over a single series
    DetectAnomalies,
    /// Trend/seasonal/residual decomposition of a single series
    SeasonalAnalysis,
    /// Pairwise Pearson correlation over named series
    CorrelationAnalysis,
    /// Linear forecast of future values for a single series
    PredictiveModeling,
    /// Cross-metric insight generation over named series
    GenerateInsights,
}

impl Operation {
    /// The wire name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::AnalyzeTrend => "analyze_trend",
            Operation::DetectAnomalies => "detect_anomalies",
            Operation::SeasonalAnalysis => "seasonal_analysis",
            Operation::CorrelationAnalysis => "correlation_analysis",
            Operation::PredictiveModeling => "predictive_modeling",
            Operation::GenerateInsights => "generate_insights",
        }
    }

    /// Parse a wire name; `None` for anything unrecognized.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "analyze_trend" => Some(Operation::AnalyzeTrend),
            "detect_anomalies" => Some(Operation::DetectAnomalies),
            "seasonal_analysis" => Some(Operation::SeasonalAnalysis),
            "correlation_analysis" => Some(Operation::CorrelationAnalysis),
            "predictive_modeling" => Some(Operation::PredictiveModeling),
            "generate_insights" => Some(Operation::GenerateInsights),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional per-request tuning; unset fields fall back to engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Z-score threshold for anomaly detection
    pub threshold: Option<f64>,
    /// Seasonal period in samples
    pub period: Option<usize>,
    /// Number of future steps to forecast
    pub steps: Option<usize>,
}

/// Input data for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisPayload {
    /// A single ordered series
    Series(Vec<f64>),
    /// A batch of named series
    Metrics(Vec<MetricSeries>),
}

/// One analysis request from the facade to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Id the reply must be tagged with
    pub id: RequestId,
    /// Operation name; unknown names yield a structured failure reply
    pub operation: String,
    /// Input data
    pub payload: AnalysisPayload,
    /// Optional tuning parameters
    pub params: AnalysisParams,
}

/// Operation-specific result shapes.
///
/// Undersized inputs are encoded as `None` or an empty list: the operation
/// completed, there was just nothing to compute (a bad metric must not
/// abort a batch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "data", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// Result of `analyze_trend`
    Trend(Option<RegressionResult>),
    /// Result of `detect_anomalies`
    Anomalies(Vec<Anomaly>),
    /// Result of `seasonal_analysis`
    Seasonal(Option<SeasonalDecomposition>),
    /// Result of `correlation_analysis`
    Correlations(Vec<SeriesCorrelation>),
    /// Result of `predictive_modeling`
    Forecast(Option<Forecast>),
    /// Result of `generate_insights`
    Insights(Vec<Insight>),
}

/// Commands sent from the facade to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineCommand {
    /// Run one analysis request
    Analyze(AnalysisRequest),
    /// Request graceful shutdown
    Shutdown,
}

/// Replies sent from the worker to the facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineReply {
    /// The operation ran to completion
    Completed {
        /// Id of the originating request
        id: RequestId,
        /// Operation-specific result
        result: AnalysisResult,
    },
    /// The operation could not run (unknown name, payload mismatch, panic)
    Failed {
        /// Id of the originating request
        id: RequestId,
        /// Human-readable cause
        error: String,
    },
}

impl EngineReply {
    /// Id of the request this reply answers.
    pub fn id(&self) -> RequestId {
        match self {
            EngineReply::Completed { id, .. } => *id,
            EngineReply::Failed { id, .. } => *id,
        }
    }
}
