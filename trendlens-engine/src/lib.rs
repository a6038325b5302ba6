#![warn(missing_docs)]
//! Trendlens Engine
//!
//! The runtime half of Trendlens: a background worker thread that executes
//! analysis requests, and a client facade that correlates id-tagged replies
//! back to callers.
//!
//! - `AnalyticsEngine`: spawn/submit/shutdown handle with per-operation
//!   convenience methods and deadline-bounded waits
//! - `AnalyticsWorker`: the dispatch loop, usable directly for embedding
//!   the worker in a custom thread
//! - `EngineConfig`: TOML configuration with discovery (`trendlens.toml`)

mod client;
mod config;
mod worker;

pub use client::{AnalysisOutcome, AnalyticsEngine, EngineError, PendingAnalysis};
pub use config::{AnalysisDefaults, CONFIG_FILE_NAME, EngineConfig, RuntimeConfig};
pub use worker::AnalyticsWorker;
