//! Aggregations and air-quality banding over readings
//!
//! These helpers back the comparison charts: per-metric averages for the
//! building bar chart, min/max for axis domains, and the PM / AQI category
//! bands used for colour coding.

use std::fmt;

use serde::Serialize;

use crate::core::types::MetricKind;
use crate::reading::Reading;

/// Upper bounds of the PM2.5 bands in µg/m³, Good through Very Unhealthy
pub const PM25_BAND_UPPER_BOUNDS: [f64; 5] = [10.0, 20.0, 35.0, 50.0, 100.0];

/// Upper bounds of the PM10 bands in µg/m³, Good through Very Unhealthy
pub const PM10_BAND_UPPER_BOUNDS: [f64; 5] = [20.0, 50.0, 100.0, 200.0, 400.0];

/// Upper bounds of the AQI guide lines, Good through Very Unhealthy
pub const AQI_BAND_UPPER_BOUNDS: [f64; 5] = [50.0, 100.0, 150.0, 200.0, 300.0];

/// Summary statistics for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStats {
    pub metric: MetricKind,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl MetricStats {
    /// Returns `None` for an empty slice
    pub fn compute(readings: &[Reading], metric: MetricKind) -> Option<Self> {
        if readings.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for value in readings.iter().map(|r| r.value(metric)) {
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }

        Some(Self { metric, count: readings.len(), min, max, mean: sum / readings.len() as f64 })
    }
}

/// Mean of every metric over a set of readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricAverages {
    pub count: usize,
    means: [f64; MetricKind::COUNT],
}

impl MetricAverages {
    pub fn get(&self, metric: MetricKind) -> f64 {
        self.means[metric.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::ALL.iter().map(move |kind| (*kind, self.means[kind.index()]))
    }
}

/// Reduces readings to one mean per metric; `None` when there is nothing to average
pub fn averages(readings: &[Reading]) -> Option<MetricAverages> {
    if readings.is_empty() {
        return None;
    }

    let mut sums = [0.0; MetricKind::COUNT];
    for reading in readings {
        for (kind, value) in reading.values().iter() {
            sums[kind.index()] += value;
        }
    }

    let count = readings.len();
    Some(MetricAverages { count, means: sums.map(|sum| sum / count as f64) })
}

/// Air-quality band shared by the PM standards table and the AQI guide lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AirQualityCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AirQualityCategory {
    const ORDERED: [AirQualityCategory; 6] = [
        Self::Good,
        Self::Moderate,
        Self::UnhealthyForSensitiveGroups,
        Self::Unhealthy,
        Self::VeryUnhealthy,
        Self::Hazardous,
    ];

    /// Category of a PM2.5 concentration in µg/m³
    pub fn from_pm25(value: f64) -> Self {
        Self::banded(value, &PM25_BAND_UPPER_BOUNDS)
    }

    /// Category of a PM10 concentration in µg/m³
    pub fn from_pm10(value: f64) -> Self {
        Self::banded(value, &PM10_BAND_UPPER_BOUNDS)
    }

    /// Category of an air-quality index value
    pub fn from_index(value: f64) -> Self {
        Self::banded(value, &AQI_BAND_UPPER_BOUNDS)
    }

    /// Worse of the PM2.5 and PM10 categories of a reading
    pub fn for_reading(reading: &Reading) -> Self {
        Self::from_pm25(reading.value(MetricKind::Pm25)).max(Self::from_pm10(reading.value(MetricKind::Pm10)))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Chart colour conventionally used for the band
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Moderate => "yellow",
            Self::UnhealthyForSensitiveGroups => "orange",
            Self::Unhealthy => "red",
            Self::VeryUnhealthy => "purple",
            Self::Hazardous => "maroon",
        }
    }

    fn banded(value: f64, upper_bounds: &[f64; 5]) -> Self {
        upper_bounds
            .iter()
            .position(|bound| value <= *bound)
            .map(|i| Self::ORDERED[i])
            .unwrap_or(Self::Hazardous)
    }
}

impl fmt::Display for AirQualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
