use super::*;
use crate::reading::RawReading;
use std::time::UNIX_EPOCH;

fn reading_with(overrides: &[(MetricKind, f64)]) -> Reading {
    let mut raw = RawReading::new(UNIX_EPOCH).with_source("greencoat");
    for kind in MetricKind::ALL {
        raw.set(kind, 0.0);
    }
    for (kind, value) in overrides {
        raw.set(*kind, *value);
    }
    raw.validate().unwrap()
}

#[test]
fn test_default_ceilings() {
    let table = ThresholdTable::default();
    assert_eq!(table.ceiling(MetricKind::Co2), 1000.0);
    assert_eq!(table.ceiling(MetricKind::Temperature), 30.0);
    assert_eq!(table.ceiling(MetricKind::Humidity), 70.0);
    assert_eq!(table.ceiling(MetricKind::VocIndex), 3.0);
    assert_eq!(table.ceiling(MetricKind::Pm1), 35.0);
    assert_eq!(table.ceiling(MetricKind::Pm25), 25.0);
    assert_eq!(table.ceiling(MetricKind::Pm10), 50.0);
}

#[test]
fn test_no_alert_below_ceilings() {
    let table = ThresholdTable::default();
    assert!(table.evaluate(&reading_with(&[])).is_none());
}

#[test]
fn test_breach_is_strictly_greater() {
    let table = ThresholdTable::default();
    assert!(table.evaluate(&reading_with(&[(MetricKind::Co2, 1000.0)])).is_none());
    assert!(table.evaluate(&reading_with(&[(MetricKind::Co2, 1000.1)])).is_some());
}

#[test]
fn test_single_breach() {
    let table = ThresholdTable::builder().with(MetricKind::Co2, 1000.0).build().unwrap();
    let alert = table.evaluate(&reading_with(&[(MetricKind::Co2, 1200.0)])).unwrap();

    assert_eq!(alert.metrics(), vec![MetricKind::Co2]);
    assert_eq!(alert.metric_names(), vec!["CO2"]);
    assert_eq!(alert.breaches[0].value, 1200.0);
    assert_eq!(alert.breaches[0].ceiling, 1000.0);
    assert_eq!(alert.source, Some(SourceTag::new("greencoat")));
}

#[test]
fn test_multiple_breaches_in_canonical_order() {
    let table = ThresholdTable::default();
    let alert = table
        .evaluate(&reading_with(&[(MetricKind::Pm10, 80.0), (MetricKind::Co2, 1500.0), (MetricKind::Pm25, 30.0)]))
        .unwrap();

    assert_eq!(alert.metrics(), vec![MetricKind::Co2, MetricKind::Pm25, MetricKind::Pm10]);
    assert_eq!(alert.message(), "Alert! High levels detected for: CO2, PM2.5, PM10");
    assert_eq!(alert.to_string(), alert.message());
}

#[test]
fn test_builder_rejects_non_finite_ceiling() {
    let err = ThresholdTable::builder().with(MetricKind::Humidity, f64::NAN).build().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_builder_keeps_unset_defaults() {
    let table = ThresholdTable::builder().with(MetricKind::Pm25, 15.0).build().unwrap();
    assert_eq!(table.ceiling(MetricKind::Pm25), 15.0);
    assert_eq!(table.ceiling(MetricKind::Pm10), 50.0);
    assert_eq!(table.iter().count(), MetricKind::COUNT);
}
