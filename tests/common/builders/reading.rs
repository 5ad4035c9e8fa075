use std::time::{Duration, SystemTime, UNIX_EPOCH};

use airgradient_metrics::core::types::{MetricKind, SourceTag};
use airgradient_metrics::reading::RawReading;

/// Epoch offset in whole seconds
pub fn ts(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// Builds raw readings with every metric present and below its default ceiling
pub struct TestReadingBuilder {
    timestamp: SystemTime,
    source: Option<SourceTag>,
    values: Vec<(MetricKind, Option<f64>)>,
}

impl TestReadingBuilder {
    pub fn new() -> Self {
        Self {
            timestamp: ts(0),
            source: None,
            values: MetricKind::ALL.iter().map(|kind| (*kind, Some(0.0))).collect(),
        }
    }

    pub fn at(mut self, secs: u64) -> Self {
        self.timestamp = ts(secs);
        self
    }

    pub fn source(mut self, tag: &str) -> Self {
        self.source = Some(SourceTag::new(tag));
        self
    }

    pub fn value(mut self, metric: MetricKind, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    pub fn without(mut self, metric: MetricKind) -> Self {
        self.set(metric, None);
        self
    }

    pub fn build(self) -> RawReading {
        let mut raw = RawReading::new(self.timestamp);
        raw.source = self.source;
        for (metric, value) in self.values {
            if let Some(value) = value {
                raw.set(metric, value);
            }
        }
        raw
    }

    fn set(&mut self, metric: MetricKind, value: Option<f64>) {
        if let Some(entry) = self.values.iter_mut().find(|(kind, _)| *kind == metric) {
            entry.1 = value;
        }
    }
}

impl Default for TestReadingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
