#![warn(missing_docs)]
//! Trendlens Message Contract
//!
//! Types exchanged between the client facade and the analytics worker.
//! Requests carry a process-unique id, an operation name, a payload, and
//! optional parameters; replies are tagged with the same id so the facade
//! can resolve callers regardless of arrival order.
//!
//! The operation name travels as a string: unknown names must reach the
//! dispatcher and come back as structured failures, never as a crash.

mod messages;

pub use messages::{
    AnalysisParams, AnalysisPayload, AnalysisRequest, AnalysisResult, EngineCommand, EngineReply,
    Operation, RequestId, UNKNOWN_OPERATION,
};
