//! # Core Types Module
//!
//! Fundamental data types shared by every part of the crate.
//!
//! ## Key Types
//!
//! * `MetricKind` - The fixed set of air-quality quantities an AirGradient device reports
//! * `SourceTag` - Identifies the device or location that produced a reading
//!
//! ## Example
//!
//! ```rust
//! use airgradient_metrics::core::types::MetricKind;
//!
//! let kind = MetricKind::from_wire_key("pm02").unwrap();
//! assert_eq!(kind, MetricKind::Pm25);
//! assert_eq!(kind.to_string(), "PM2.5");
//! ```

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One measured air-quality quantity
///
/// The declaration order is the canonical metric order used for iteration,
/// storage and alert reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    /// Carbon dioxide in ppm
    #[serde(rename = "rco2")]
    Co2,
    /// Ambient temperature in degrees Celsius
    #[serde(rename = "atmp")]
    Temperature,
    /// Relative humidity in percent
    #[serde(rename = "rhum")]
    Humidity,
    /// Sensirion VOC index
    #[serde(rename = "tvoc_index")]
    VocIndex,
    /// PM1 particulate matter in µg/m³
    #[serde(rename = "pm01")]
    Pm1,
    /// PM2.5 particulate matter in µg/m³
    #[serde(rename = "pm02")]
    Pm25,
    /// PM10 particulate matter in µg/m³
    #[serde(rename = "pm10")]
    Pm10,
}

impl MetricKind {
    /// Number of enumerated metrics
    pub const COUNT: usize = 7;

    /// Every metric in canonical order
    pub const ALL: [MetricKind; MetricKind::COUNT] = [
        MetricKind::Co2,
        MetricKind::Temperature,
        MetricKind::Humidity,
        MetricKind::VocIndex,
        MetricKind::Pm1,
        MetricKind::Pm25,
        MetricKind::Pm10,
    ];

    /// Key used for this metric in AirGradient JSON payloads
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::Co2 => "rco2",
            Self::Temperature => "atmp",
            Self::Humidity => "rhum",
            Self::VocIndex => "tvoc_index",
            Self::Pm1 => "pm01",
            Self::Pm25 => "pm02",
            Self::Pm10 => "pm10",
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Co2 => "CO2",
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::VocIndex => "VOC Index",
            Self::Pm1 => "PM1",
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
        }
    }

    /// Unit of measurement, empty for dimensionless indices
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Co2 => "ppm",
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::VocIndex => "",
            Self::Pm1 | Self::Pm25 | Self::Pm10 => "µg/m³",
        }
    }

    /// Looks up a metric by its wire key
    pub fn from_wire_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.wire_key() == key)
    }

    /// Position of this metric in [`MetricKind::ALL`]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies the device or location a reading came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTag(String);

impl SourceTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for SourceTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Converts epoch seconds (possibly fractional) into a `SystemTime`
///
/// Negative inputs clamp to the epoch. Returns `None` for NaN, infinities and
/// values past what `SystemTime` can represent.
pub fn system_time_from_secs(secs: f64) -> Option<SystemTime> {
    if secs <= 0.0 {
        return Some(UNIX_EPOCH);
    }
    Duration::try_from_secs_f64(secs).ok().and_then(|offset| UNIX_EPOCH.checked_add(offset))
}

/// Milliseconds since the epoch, saturating at zero for pre-epoch times
pub fn epoch_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

/// Serde helper writing a `SystemTime` as epoch milliseconds
pub(crate) fn serialize_epoch_millis<S: serde::Serializer>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(epoch_millis(*time))
}
