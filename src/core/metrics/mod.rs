//! Per-metric time series handed to chart renderers
//!
//! A [`MetricSeries`] is one line of a chart: the values of a single
//! [`MetricKind`] across a window snapshot, oldest first.
//!
//! ```rust
//! use std::time::{Duration, UNIX_EPOCH};
//! use airgradient_metrics::core::metrics::{Metric, MetricSeries};
//! use airgradient_metrics::core::types::MetricKind;
//!
//! let mut co2 = MetricSeries::new(MetricKind::Co2);
//! co2.push(Metric::with_timestamp(612.0, UNIX_EPOCH + Duration::from_secs(1)));
//! co2.push(Metric::with_timestamp(640.0, UNIX_EPOCH + Duration::from_secs(2)));
//!
//! assert_eq!(co2.points(), vec![(1000, 612.0), (2000, 640.0)]);
//! assert_eq!(co2.bounds(), Some((612.0, 640.0)));
//! ```

use std::time::SystemTime;

use serde::Serialize;

use super::types::{epoch_millis, serialize_epoch_millis, MetricKind};

/// A value observed at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric<T> {
    pub value: T,
    #[serde(rename = "timestamp_ms", serialize_with = "serialize_epoch_millis")]
    pub timestamp: SystemTime,
}

impl<T> Metric<T> {
    /// Stamps `value` with the current time
    pub fn new(value: T) -> Self {
        Self::with_timestamp(value, SystemTime::now())
    }

    pub fn with_timestamp(value: T, timestamp: SystemTime) -> Self {
        Self { value, timestamp }
    }
}

/// Values of one metric in time order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries<T> {
    pub kind: MetricKind,
    pub metrics: Vec<Metric<T>>,
}

impl<T> MetricSeries<T> {
    pub fn new(kind: MetricKind) -> Self {
        Self { kind, metrics: Vec::new() }
    }

    pub fn push(&mut self, metric: Metric<T>) {
        self.metrics.push(metric);
    }

    pub fn latest(&self) -> Option<&Metric<T>> {
        self.metrics.last()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric<T>> {
        self.metrics.iter()
    }
}

impl<T: Copy> MetricSeries<T> {
    /// `(epoch ms, value)` pairs, the x/y data of a line chart
    pub fn points(&self) -> Vec<(u64, T)> {
        self.metrics.iter().map(|m| (epoch_millis(m.timestamp), m.value)).collect()
    }
}

impl MetricSeries<f64> {
    /// Smallest and largest value, for scaling a chart axis
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.metrics.iter().map(|m| m.value).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl<T> Extend<Metric<T>> for MetricSeries<T> {
    fn extend<I: IntoIterator<Item = Metric<T>>>(&mut self, iter: I) {
        self.metrics.extend(iter);
    }
}
