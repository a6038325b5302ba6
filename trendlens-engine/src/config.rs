//! Configuration loading from trendlens.toml
//!
//! Engine configuration can be specified in a `trendlens.toml` file in the
//! project root. The configuration is automatically discovered by walking
//! up from the current directory.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "trendlens.toml";

/// Trendlens engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Default analysis parameters applied when a request leaves them unset
    #[serde(default)]
    pub analysis: AnalysisDefaults,
    /// Runtime behavior of the engine
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Defaults for per-operation tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    /// Z-score threshold for anomaly detection
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,
    /// Seasonal period in samples
    #[serde(default = "default_seasonal_period")]
    pub seasonal_period: usize,
    /// Number of future steps to forecast
    #[serde(default = "default_forecast_steps")]
    pub forecast_steps: usize,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            anomaly_threshold: default_anomaly_threshold(),
            seasonal_period: default_seasonal_period(),
            forecast_steps: default_forecast_steps(),
        }
    }
}

fn default_anomaly_threshold() -> f64 {
    trendlens_stats::DEFAULT_ANOMALY_THRESHOLD
}
fn default_seasonal_period() -> usize {
    trendlens_stats::DEFAULT_SEASONAL_PERIOD
}
fn default_forecast_steps() -> usize {
    trendlens_stats::DEFAULT_FORECAST_STEPS
}

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// How long a caller waits for a reply before timing out (e.g. "30s", "500ms")
    #[serde(default = "default_reply_timeout")]
    pub reply_timeout: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            reply_timeout: default_reply_timeout(),
        }
    }
}

fn default_reply_timeout() -> String {
    "30s".to_string()
}

impl RuntimeConfig {
    /// The reply timeout parsed into a `Duration`.
    pub fn reply_deadline(&self) -> anyhow::Result<Duration> {
        EngineConfig::parse_duration(&self.reply_timeout).map(Duration::from_nanos)
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Trendlens Configuration

[analysis]
# Z-score threshold for anomaly detection
anomaly_threshold = 2.0
# Seasonal period in samples (7 = weekly cadence for daily data)
seasonal_period = 7
# Number of future steps to forecast
forecast_steps = 7

[runtime]
# How long a caller waits for an analysis reply
reply_timeout = "30s"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}
