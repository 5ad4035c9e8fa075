//! Threshold alerts
//!
//! A [`ThresholdTable`] maps every metric to a ceiling. Evaluating a reading
//! against the table yields at most one [`Alert`] carrying every breached
//! metric. A breach is strictly `value > ceiling`; each reading is judged on
//! its own, with no hysteresis or repeat suppression.
//!
//! # Examples
//!
//! ```rust
//! use std::time::SystemTime;
//! use airgradient_metrics::alert::ThresholdTable;
//! use airgradient_metrics::core::types::MetricKind;
//! use airgradient_metrics::reading::RawReading;
//!
//! let table = ThresholdTable::default();
//! let mut raw = RawReading::new(SystemTime::now());
//! for kind in MetricKind::ALL {
//!     raw.set(kind, 0.0);
//! }
//! raw.set(MetricKind::Co2, 1200.0);
//!
//! let alert = table.evaluate(&raw.validate().unwrap()).unwrap();
//! assert_eq!(alert.metric_names(), vec!["CO2"]);
//! ```

/// Alert threshold constants
pub mod constants;

use std::fmt;
use std::time::SystemTime;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::core::types::{MetricKind, SourceTag};
use crate::error::{Error, Result};
use crate::reading::Reading;

use constants::*;

static DEFAULT_TABLE: Lazy<ThresholdTable> = Lazy::new(|| ThresholdTable {
    ceilings: [
        DEFAULT_CO2_THRESHOLD,
        DEFAULT_TEMPERATURE_THRESHOLD,
        DEFAULT_HUMIDITY_THRESHOLD,
        DEFAULT_VOC_INDEX_THRESHOLD,
        DEFAULT_PM1_THRESHOLD,
        DEFAULT_PM25_THRESHOLD,
        DEFAULT_PM10_THRESHOLD,
    ],
});

/// Immutable mapping from metric to alert ceiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    ceilings: [f64; MetricKind::COUNT],
}

impl Default for ThresholdTable {
    fn default() -> Self {
        *DEFAULT_TABLE
    }
}

impl ThresholdTable {
    /// Starts from the default ceilings
    pub fn builder() -> ThresholdTableBuilder {
        ThresholdTableBuilder { table: Self::default() }
    }

    pub fn ceiling(&self, metric: MetricKind) -> f64 {
        self.ceilings[metric.index()]
    }

    /// Iterates `(metric, ceiling)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::ALL.iter().map(move |kind| (*kind, self.ceilings[kind.index()]))
    }

    /// Returns the breaches in `reading`, if any
    pub fn evaluate(&self, reading: &Reading) -> Option<Alert> {
        let breaches: Vec<Breach> = reading
            .values()
            .iter()
            .filter(|(kind, value)| *value > self.ceiling(*kind))
            .map(|(metric, value)| Breach { metric, value, ceiling: self.ceiling(metric) })
            .collect();

        if breaches.is_empty() {
            return None;
        }

        Some(Alert { timestamp: reading.timestamp(), source: reading.source().cloned(), breaches })
    }
}

/// Builder for [`ThresholdTable`] that validates each ceiling
#[derive(Debug, Clone)]
pub struct ThresholdTableBuilder {
    table: ThresholdTable,
}

impl ThresholdTableBuilder {
    pub fn with(mut self, metric: MetricKind, ceiling: f64) -> Self {
        self.table.ceilings[metric.index()] = ceiling;
        self
    }

    pub fn build(self) -> Result<ThresholdTable> {
        for (metric, ceiling) in self.table.iter() {
            if !ceiling.is_finite() {
                return Err(Error::invalid_configuration(format!("Threshold for {} must be finite", metric), ceiling));
            }
        }
        Ok(self.table)
    }
}

/// A single metric exceeding its ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breach {
    pub metric: MetricKind,
    pub value: f64,
    pub ceiling: f64,
}

/// Domain event raised when a newly ingested reading breaches one or more ceilings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(skip)]
    pub timestamp: SystemTime,
    pub source: Option<SourceTag>,
    pub breaches: Vec<Breach>,
}

impl Alert {
    /// Breached metrics in canonical order
    pub fn metrics(&self) -> Vec<MetricKind> {
        self.breaches.iter().map(|b| b.metric).collect()
    }

    pub fn metric_names(&self) -> Vec<&'static str> {
        self.breaches.iter().map(|b| b.metric.name()).collect()
    }

    pub fn message(&self) -> String {
        format!("{}{}", ALERT_MESSAGE_PREFIX, self.metric_names().join(", "))
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests;
