//! Client Facade
//!
//! `AnalyticsEngine` owns the background worker and a reply router. Every
//! submitted request gets a process-unique id and a `PendingAnalysis`
//! handle; the router resolves handles by id as replies arrive, so replies
//! may complete in any order.
//!
//! The command channel is unbounded: a caller that submits faster than the
//! worker drains will queue requests without backpressure. There is no
//! cancellation either: dropping a `PendingAnalysis` simply discards the
//! eventual reply.

use crate::config::EngineConfig;
use crate::worker::AnalyticsWorker;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use trendlens_proto::{
    AnalysisParams, AnalysisPayload, AnalysisRequest, AnalysisResult, EngineCommand, EngineReply,
    Operation, RequestId,
};
use trendlens_stats::MetricSeries;

/// Errors surfaced by the engine facade.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The worker or router thread could not be started
    #[error("failed to start engine thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The configuration could not be applied
    #[error("invalid engine configuration: {0}")]
    Config(String),

    /// The worker replied with a failure for this request
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// No reply arrived within the deadline
    #[error("timed out waiting for an analysis reply")]
    Timeout,

    /// The engine shut down before this request was answered
    #[error("analytics worker disconnected")]
    Disconnected,
}

/// What a caller ultimately receives for one request.
pub type AnalysisOutcome = Result<AnalysisResult, EngineError>;

type PendingTable = Arc<Mutex<FxHashMap<RequestId, Sender<AnalysisOutcome>>>>;

/// Handle to the background analytics worker.
///
/// Supports any number of concurrent in-flight requests, distinguished
/// solely by request id. Dropping the engine shuts it down and abandons
/// whatever is still in flight.
pub struct AnalyticsEngine {
    commands: Sender<EngineCommand>,
    pending: PendingTable,
    next_id: AtomicU64,
    reply_timeout: Duration,
    worker: Option<JoinHandle<()>>,
    router: Option<JoinHandle<()>>,
}

impl AnalyticsEngine {
    /// Start an engine with default configuration.
    pub fn spawn() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default())
    }

    /// Start an engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let reply_timeout = config
            .runtime
            .reply_deadline()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        let (command_tx, command_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();
        let pending: PendingTable = Arc::new(Mutex::new(FxHashMap::default()));

        let defaults = config.analysis.clone();
        let worker = std::thread::Builder::new()
            .name("trendlens-worker".to_string())
            .spawn(move || AnalyticsWorker::new(command_rx, reply_tx, defaults).run())?;

        let table = Arc::clone(&pending);
        let router = std::thread::Builder::new()
            .name("trendlens-router".to_string())
            .spawn(move || route_replies(reply_rx, table))?;

        Ok(Self {
            commands: command_tx,
            pending,
            next_id: AtomicU64::new(1),
            reply_timeout,
            worker: Some(worker),
            router: Some(router),
        })
    }

    /// Submit a request under an arbitrary operation name.
    ///
    /// The name is not validated here: unknown names travel to the worker
    /// and come back as a structured `Analysis` error, mirroring how the
    /// dispatcher treats any malformed request.
    pub fn submit(
        &self,
        operation: &str,
        payload: AnalysisPayload,
        params: AnalysisParams,
    ) -> PendingAnalysis {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (done_tx, done_rx) = mpsc::channel();
        self.pending.lock().insert(id, done_tx);

        let request = AnalysisRequest {
            id,
            operation: operation.to_string(),
            payload,
            params,
        };
        if self.commands.send(EngineCommand::Analyze(request)).is_err() {
            // Worker already gone: unregister so the caller observes
            // Disconnected instead of waiting out the full deadline.
            self.pending.lock().remove(&id);
        }

        PendingAnalysis {
            id,
            receiver: done_rx,
            deadline: self.reply_timeout,
        }
    }

    /// Fit a regression line over a series.
    pub fn analyze_trend(&self, values: &[f64]) -> PendingAnalysis {
        self.submit(
            Operation::AnalyzeTrend.as_str(),
            AnalysisPayload::Series(values.to_vec()),
            AnalysisParams::default(),
        )
    }

    /// Detect anomalies; `threshold` of `None` uses the configured default.
    pub fn detect_anomalies(&self, values: &[f64], threshold: Option<f64>) -> PendingAnalysis {
        self.submit(
            Operation::DetectAnomalies.as_str(),
            AnalysisPayload::Series(values.to_vec()),
            AnalysisParams {
                threshold,
                ..Default::default()
            },
        )
    }

    /// Decompose a series; `period` of `None` uses the configured default.
    pub fn seasonal_analysis(&self, values: &[f64], period: Option<usize>) -> PendingAnalysis {
        self.submit(
            Operation::SeasonalAnalysis.as_str(),
            AnalysisPayload::Series(values.to_vec()),
            AnalysisParams {
                period,
                ..Default::default()
            },
        )
    }

    /// Correlate every pair of named series.
    pub fn correlation_analysis(&self, metrics: &[MetricSeries]) -> PendingAnalysis {
        self.submit(
            Operation::CorrelationAnalysis.as_str(),
            AnalysisPayload::Metrics(metrics.to_vec()),
            AnalysisParams::default(),
        )
    }

    /// Forecast future values; `steps` of `None` uses the configured default.
    pub fn predictive_modeling(&self, values: &[f64], steps: Option<usize>) -> PendingAnalysis {
        self.submit(
            Operation::PredictiveModeling.as_str(),
            AnalysisPayload::Series(values.to_vec()),
            AnalysisParams {
                steps,
                ..Default::default()
            },
        )
    }

    /// Generate insights for a batch of named metrics.
    pub fn generate_insights(&self, metrics: &[MetricSeries]) -> PendingAnalysis {
        self.submit(
            Operation::GenerateInsights.as_str(),
            AnalysisPayload::Metrics(metrics.to_vec()),
            AnalysisParams::default(),
        )
    }

    /// Number of requests submitted but not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.pending.lock().len()
    }

    /// Shut down the engine, abandoning in-flight requests.
    ///
    /// Waiters on abandoned requests observe `EngineError::Disconnected`.
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        let _ = self.commands.send(EngineCommand::Shutdown);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        // The worker dropped its reply sender, so the router drains and exits
        if let Some(handle) = self.router.take() {
            let _ = handle.join();
        }
        // Drop completion senders for anything still unresolved
        self.pending.lock().clear();
    }
}

impl Drop for AnalyticsEngine {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

/// Resolve pending requests as replies arrive, in whatever order.
fn route_replies(replies: Receiver<EngineReply>, pending: PendingTable) {
    while let Ok(reply) = replies.recv() {
        let (id, outcome) = match reply {
            EngineReply::Completed { id, result } => (id, Ok(result)),
            EngineReply::Failed { id, error } => (id, Err(EngineError::Analysis(error))),
        };
        let entry = pending.lock().remove(&id);
        if let Some(sender) = entry {
            // The caller may have dropped its handle; the reply is discarded
            let _ = sender.send(outcome);
        }
    }
}

/// One in-flight request.
///
/// Waiting consumes the handle; dropping it without waiting discards the
/// eventual reply (there is no way to abort the computation itself).
pub struct PendingAnalysis {
    id: RequestId,
    receiver: Receiver<AnalysisOutcome>,
    deadline: Duration,
}

impl PendingAnalysis {
    /// Id assigned to this request.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Block until the reply arrives or the configured deadline passes.
    pub fn wait(self) -> AnalysisOutcome {
        let deadline = self.deadline;
        self.wait_timeout(deadline)
    }

    /// Block with an explicit deadline.
    pub fn wait_timeout(self, timeout: Duration) -> AnalysisOutcome {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => Err(EngineError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }
}
