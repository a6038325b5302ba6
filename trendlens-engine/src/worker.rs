//! Analytics Worker
//!
//! The background dispatch shim. Drains a command channel, routes each
//! request by operation name to the matching statistics function, and
//! replies with an id-tagged `Completed` or `Failed` message.
//!
//! A panic inside a computation is caught at the dispatch boundary and
//! surfaced as a `Failed` reply; the worker keeps serving. Undersized
//! inputs are not failures: the operation completes with a `None`/empty
//! result so one bad metric cannot abort a batch.

use crate::config::AnalysisDefaults;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::{Receiver, Sender};
use trendlens_proto::{
    AnalysisPayload, AnalysisRequest, AnalysisResult, EngineCommand, EngineReply, Operation,
    UNKNOWN_OPERATION,
};
use trendlens_stats::{
    MetricSeries, correlation_matrix, detect_anomalies, forecast, generate_insights,
    linear_regression, seasonal_decompose,
};

/// Worker half of the engine: owns the command receiver and reply sender.
pub struct AnalyticsWorker {
    commands: Receiver<EngineCommand>,
    replies: Sender<EngineReply>,
    defaults: AnalysisDefaults,
}

impl AnalyticsWorker {
    /// Create a worker over the given channel ends.
    pub fn new(
        commands: Receiver<EngineCommand>,
        replies: Sender<EngineReply>,
        defaults: AnalysisDefaults,
    ) -> Self {
        Self {
            commands,
            replies,
            defaults,
        }
    }

    /// Run the worker loop until `Shutdown` arrives or a channel closes.
    pub fn run(self) {
        while let Ok(command) = self.commands.recv() {
            match command {
                EngineCommand::Shutdown => break,
                EngineCommand::Analyze(request) => {
                    let reply = self.execute(request);
                    if self.replies.send(reply).is_err() {
                        // Facade is gone; nobody is listening
                        break;
                    }
                }
            }
        }
    }

    /// Run one request with panic isolation at the boundary.
    fn execute(&self, request: AnalysisRequest) -> EngineReply {
        let id = request.id;
        match catch_unwind(AssertUnwindSafe(|| dispatch(&request, &self.defaults))) {
            Ok(Ok(result)) => EngineReply::Completed { id, result },
            Ok(Err(error)) => EngineReply::Failed { id, error },
            Err(panic) => EngineReply::Failed {
                id,
                error: panic_message(panic),
            },
        }
    }
}

/// Route a request to the statistics function named by its operation.
fn dispatch(request: &AnalysisRequest, defaults: &AnalysisDefaults) -> Result<AnalysisResult, String> {
    let operation =
        Operation::parse(&request.operation).ok_or_else(|| UNKNOWN_OPERATION.to_string())?;

    match operation {
        Operation::AnalyzeTrend => {
            let series = expect_series(request)?;
            Ok(AnalysisResult::Trend(linear_regression(series)))
        }
        Operation::DetectAnomalies => {
            let series = expect_series(request)?;
            let threshold = request
                .params
                .threshold
                .unwrap_or(defaults.anomaly_threshold);
            Ok(AnalysisResult::Anomalies(detect_anomalies(
                series, threshold,
            )))
        }
        Operation::SeasonalAnalysis => {
            let series = expect_series(request)?;
            let period = request.params.period.unwrap_or(defaults.seasonal_period);
            Ok(AnalysisResult::Seasonal(seasonal_decompose(series, period)))
        }
        Operation::CorrelationAnalysis => {
            let metrics = expect_metrics(request)?;
            Ok(AnalysisResult::Correlations(correlation_matrix(metrics)))
        }
        Operation::PredictiveModeling => {
            let series = expect_series(request)?;
            let steps = request.params.steps.unwrap_or(defaults.forecast_steps);
            Ok(AnalysisResult::Forecast(forecast(series, steps)))
        }
        Operation::GenerateInsights => {
            let metrics = expect_metrics(request)?;
            Ok(AnalysisResult::Insights(generate_insights(metrics)))
        }
    }
}

fn expect_series(request: &AnalysisRequest) -> Result<&[f64], String> {
    match &request.payload {
        AnalysisPayload::Series(values) => Ok(values),
        AnalysisPayload::Metrics(_) => Err(format!(
            "operation `{}` expects a plain series payload",
            request.operation
        )),
    }
}

fn expect_metrics(request: &AnalysisRequest) -> Result<&[MetricSeries], String> {
    match &request.payload {
        AnalysisPayload::Metrics(metrics) => Ok(metrics),
        AnalysisPayload::Series(_) => Err(format!(
            "operation `{}` expects a named-series payload",
            request.operation
        )),
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("analysis panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("analysis panicked: {s}")
    } else {
        "analysis panicked".to_string()
    }
}
