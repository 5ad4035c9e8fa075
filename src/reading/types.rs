use std::collections::BTreeMap;
use std::time::SystemTime;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::types::{serialize_epoch_millis, MetricKind, SourceTag};
use crate::error::{Result, ValidationError};

/// A sample as delivered by a source, before validation
///
/// Any subset of metrics may be present and values are not yet checked for
/// finiteness.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub timestamp: SystemTime,
    pub source: Option<SourceTag>,
    values: BTreeMap<MetricKind, f64>,
}

impl RawReading {
    pub fn new(timestamp: SystemTime) -> Self {
        Self { timestamp, source: None, values: BTreeMap::new() }
    }

    /// Sets a metric value, builder style
    pub fn with_value(mut self, metric: MetricKind, value: f64) -> Self {
        self.values.insert(metric, value);
        self
    }

    pub fn with_source(mut self, source: impl Into<SourceTag>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn set(&mut self, metric: MetricKind, value: f64) {
        self.values.insert(metric, value);
    }

    pub fn remove(&mut self, metric: MetricKind) -> Option<f64> {
        self.values.remove(&metric)
    }

    pub fn value(&self, metric: MetricKind) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    /// Builds a raw reading from an AirGradient JSON message object
    ///
    /// Unknown keys are ignored. A metric key whose value is not a JSON number
    /// is recorded as NaN so validation rejects it.
    pub fn from_payload(message: &Map<String, Value>, timestamp: SystemTime) -> Self {
        let mut raw = Self::new(timestamp);
        for kind in MetricKind::ALL {
            if let Some(value) = message.get(kind.wire_key()) {
                raw.set(kind, value.as_f64().unwrap_or(f64::NAN));
            }
        }
        raw
    }

    /// Parses a JSON message string such as a live telemetry payload
    pub fn from_json_str(payload: &str, timestamp: SystemTime) -> Result<Self> {
        let message: Map<String, Value> = serde_json::from_str(payload)?;
        Ok(Self::from_payload(&message, timestamp))
    }

    /// Checks completeness and finiteness, producing a [`Reading`]
    pub fn validate(&self) -> std::result::Result<Reading, ValidationError> {
        let mut values = [0.0; MetricKind::COUNT];
        for kind in MetricKind::ALL {
            let value = self.value(kind).ok_or(ValidationError::MissingMetric(kind))?;
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue { metric: kind, value });
            }
            values[kind.index()] = value;
        }
        Ok(Reading { timestamp: self.timestamp, source: self.source.clone(), values: MetricValues(values) })
    }
}

impl From<Reading> for RawReading {
    fn from(reading: Reading) -> Self {
        let mut raw = RawReading::new(reading.timestamp);
        raw.source = reading.source;
        for (kind, value) in reading.values.iter() {
            raw.set(kind, value);
        }
        raw
    }
}

impl TryFrom<RawReading> for Reading {
    type Error = ValidationError;

    fn try_from(raw: RawReading) -> std::result::Result<Self, Self::Error> {
        raw.validate()
    }
}

/// One finite value per enumerated metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricValues([f64; MetricKind::COUNT]);

impl MetricValues {
    pub fn get(&self, metric: MetricKind) -> f64 {
        self.0[metric.index()]
    }

    /// Iterates `(metric, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::ALL.iter().map(move |kind| (*kind, self.0[kind.index()]))
    }
}

impl Serialize for MetricValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MetricKind::COUNT))?;
        for (kind, value) in self.iter() {
            map.serialize_entry(kind.wire_key(), &value)?;
        }
        map.end()
    }
}

/// A validated sensor sample
///
/// Always carries every enumerated metric with a finite value. The only way
/// to obtain one is [`RawReading::validate`]:
///
/// ```compile_fail
/// use std::time::SystemTime;
/// use airgradient_metrics::reading::Reading;
///
/// let forged = Reading { timestamp: SystemTime::now(), source: None, values: unimplemented!() };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    #[serde(rename = "timestamp_ms", serialize_with = "serialize_epoch_millis")]
    timestamp: SystemTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SourceTag>,
    values: MetricValues,
}

impl Reading {
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn source(&self) -> Option<&SourceTag> {
        self.source.as_ref()
    }

    pub fn values(&self) -> &MetricValues {
        &self.values
    }

    pub fn value(&self, metric: MetricKind) -> f64 {
        self.values.get(metric)
    }
}
