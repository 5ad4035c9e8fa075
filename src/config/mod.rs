//! Monitor configuration
//!
//! [`MonitorConfig`] gathers every tunable of a monitor in one serde
//! structure so it can be loaded from a JSON file:
//!
//! ```json
//! {
//!     "retention": {"mode": "time", "seconds": 50},
//!     "thresholds": {"rco2": 800, "pm02": 15},
//!     "replay_interval_ms": 1000,
//!     "subscription_capacity": 64
//! }
//! ```
//!
//! Every field is optional. Thresholds not listed keep their defaults.
//!
//! # Examples
//!
//! ```rust
//! use airgradient_metrics::config::MonitorConfig;
//! use airgradient_metrics::core::types::MetricKind;
//!
//! let config = MonitorConfig::from_json_str(r#"{"thresholds": {"rco2": 800}}"#).unwrap();
//! let window = config.window_config().unwrap();
//! assert_eq!(window.thresholds.ceiling(MetricKind::Co2), 800.0);
//! assert_eq!(window.thresholds.ceiling(MetricKind::Pm25), 25.0);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::alert::ThresholdTable;
use crate::core::types::MetricKind;
use crate::error::{Error, Result};
use crate::source::constants::{DEFAULT_REPLAY_INTERVAL_MS, DEFAULT_SUBSCRIPTION_CAPACITY};
use crate::window::constants::{DEFAULT_MAX_READINGS, DEFAULT_RETENTION_SECS};
use crate::window::{RetentionPolicy, WindowConfig};

/// Retention section of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RetentionConfig {
    Count { max_readings: usize },
    Time { seconds: f64 },
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self::Count { max_readings: DEFAULT_MAX_READINGS }
    }
}

impl RetentionConfig {
    /// Fifty second time window used by the live dashboard
    pub fn realtime() -> Self {
        Self::Time { seconds: DEFAULT_RETENTION_SECS as f64 }
    }

    pub fn to_policy(&self) -> Result<RetentionPolicy> {
        let policy = match *self {
            Self::Count { max_readings } => RetentionPolicy::Count(max_readings),
            Self::Time { seconds } => {
                let retention = Duration::try_from_secs_f64(seconds).map_err(|_| {
                    Error::invalid_configuration("Time retention must be a non-negative number of seconds", seconds)
                })?;
                RetentionPolicy::Time(retention)
            }
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Everything needed to assemble a monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub retention: RetentionConfig,
    /// Ceiling overrides keyed by metric
    pub thresholds: BTreeMap<MetricKind, f64>,
    /// Pause between replayed readings
    pub replay_interval_ms: u64,
    /// Readings buffered per subscription before publishers wait
    pub subscription_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            retention: RetentionConfig::default(),
            thresholds: BTreeMap::new(),
            replay_interval_ms: DEFAULT_REPLAY_INTERVAL_MS,
            subscription_capacity: DEFAULT_SUBSCRIPTION_CAPACITY,
        }
    }
}

impl MonitorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json_str(&fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded monitor configuration");
        Ok(config)
    }

    /// Threshold table with the overrides applied on top of the defaults
    pub fn threshold_table(&self) -> Result<ThresholdTable> {
        self.thresholds
            .iter()
            .fold(ThresholdTable::builder(), |builder, (metric, ceiling)| builder.with(*metric, *ceiling))
            .build()
    }

    /// Validated window configuration
    pub fn window_config(&self) -> Result<WindowConfig> {
        Ok(WindowConfig { retention: self.retention.to_policy()?, thresholds: self.threshold_table()? })
    }

    pub fn replay_interval(&self) -> Duration {
        Duration::from_millis(self.replay_interval_ms)
    }
}
