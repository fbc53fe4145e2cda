//! Configuration types for mass-backtester

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub account: AccountConfig,
    pub engine: EngineConfig,
    pub staging: StagingConfig,
    pub strategy: StrategyConfig,
    pub telemetry: TelemetryConfig,
}

/// Simulated account the engine trades against
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub currency: String,
    pub initial_amount: f64,
    pub lot_size: i64,
    /// Candle period the engine runs the strategy on
    pub default_period: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            initial_amount: 50_000.0,
            lot_size: 1000,
            default_period: "m1".to_string(),
        }
    }
}

/// Engine process configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Forced termination bound for one engine invocation, in seconds
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { timeout_secs: 3600 }
    }
}

/// Staging directory configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Directory for per-week temporary artifacts; defaults to a named
    /// subdirectory of the OS temp dir when unset
    pub dir: Option<PathBuf>,
}

impl StagingConfig {
    /// The directory staged files are written to
    pub fn resolve(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("mass-backtester"))
    }
}

/// Strategy parameters forwarded into every job descriptor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub params: std::collections::BTreeMap<String, String>,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
