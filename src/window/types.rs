use std::time::{Duration, SystemTime};

use serde::Serialize;

use crate::alert::ThresholdTable;
use crate::analysis::{self, MetricAverages, MetricStats};
use crate::core::metrics::{Metric, MetricSeries};
use crate::core::types::{epoch_millis, MetricKind};
use crate::error::{Error, Result};
use crate::reading::Reading;

use super::constants::{DEFAULT_MAX_READINGS, DEFAULT_RETENTION};

/// How the window bounds its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Keep at most this many of the most recent readings
    Count(usize),
    /// Keep readings no older than this, relative to the newest timestamp seen
    Time(Duration),
}

impl RetentionPolicy {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Count(0) => Err(Error::invalid_configuration("Count retention must keep at least one reading", 0)),
            Self::Time(retention) if retention.is_zero() => {
                Err(Error::invalid_configuration("Time retention must be a positive duration", format!("{:?}", retention)))
            }
            _ => Ok(()),
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::Count(DEFAULT_MAX_READINGS)
    }
}

/// Construction parameters for a [`ReadingWindow`](super::ReadingWindow)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowConfig {
    pub retention: RetentionPolicy,
    pub thresholds: ThresholdTable,
}

impl WindowConfig {
    /// Count-bounded window with default thresholds
    pub fn count(max_readings: usize) -> Self {
        Self { retention: RetentionPolicy::Count(max_readings), ..Self::default() }
    }

    /// Time-bounded window with default thresholds
    pub fn time(retention: Duration) -> Self {
        Self { retention: RetentionPolicy::Time(retention), ..Self::default() }
    }

    /// Time-bounded window with the default fifty second retention
    pub fn realtime() -> Self {
        Self::time(DEFAULT_RETENTION)
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdTable) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Immutable copy of the window contents, oldest first
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct WindowSnapshot {
    readings: Vec<Reading>,
}

impl WindowSnapshot {
    pub(crate) fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn into_readings(self) -> Vec<Reading> {
        self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    /// Most recently ingested reading
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    pub fn timestamps(&self) -> Vec<SystemTime> {
        self.readings.iter().map(|r| r.timestamp()).collect()
    }

    /// Time series of one metric, for line charts
    pub fn series(&self, metric: MetricKind) -> MetricSeries<f64> {
        let mut series = MetricSeries::new(metric);
        series.extend(self.readings.iter().map(|r| Metric::with_timestamp(r.value(metric), r.timestamp())));
        series
    }

    /// Readings with `start <= timestamp <= end`, in window order
    pub fn between(&self, start: SystemTime, end: SystemTime) -> WindowSnapshot {
        Self::new(self.readings.iter().filter(|r| r.timestamp() >= start && r.timestamp() <= end).cloned().collect())
    }

    pub fn stats(&self, metric: MetricKind) -> Option<MetricStats> {
        MetricStats::compute(&self.readings, metric)
    }

    pub fn averages(&self) -> Option<MetricAverages> {
        analysis::averages(&self.readings)
    }

    /// Pretty-printed JSON of the readings in `[start, end]`
    pub fn export_json(&self, start: SystemTime, end: SystemTime) -> Result<String> {
        let range = self.between(start, end);
        if range.is_empty() {
            return Err(Error::no_data(format!(
                "no readings between {} ms and {} ms",
                epoch_millis(start),
                epoch_millis(end)
            )));
        }
        Ok(serde_json::to_string_pretty(&range)?)
    }
}

impl<'a> IntoIterator for &'a WindowSnapshot {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}
