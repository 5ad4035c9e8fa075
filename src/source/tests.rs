use super::constants::{topic_for_building, KNOWN_DEVICES};
use super::*;
use crate::core::types::{MetricKind, SourceTag};
use futures::StreamExt;
use std::time::{Duration, UNIX_EPOCH};

const EXPORT: &str = r#"{
    "readings": [
        {"time_ms": 1715000000, "message": {"rco2": 600, "atmp": 21.0, "rhum": 45, "tvoc_index": 1,
                                             "pm01": 2, "pm02": 4, "pm10": 6, "wifi": -60}},
        {"time_ms": 1715000060, "message": {"rco2": 650, "atmp": 21.5, "rhum": 46, "tvoc_index": 1,
                                             "pm01": 2, "pm02": 5, "pm10": 7}},
        {"time_ms": 1715000120, "message": {"rco2": 700, "atmp": 22.0, "tvoc_index": 1,
                                             "pm01": 3, "pm02": 5, "pm10": 8}}
    ]
}"#;

fn replay() -> ReplaySource {
    ReplaySource::from_json_str(EXPORT).unwrap().with_interval(Duration::ZERO)
}

#[tokio::test]
async fn test_replay_yields_records_in_order() {
    let mut source = replay();
    assert_eq!(source.len(), 3);

    let first = source.next_reading().await.unwrap().unwrap();
    assert_eq!(first.timestamp, UNIX_EPOCH + Duration::from_secs(1_715_000_000));
    assert_eq!(first.value(MetricKind::Co2), Some(600.0));

    let second = source.next_reading().await.unwrap().unwrap();
    assert_eq!(second.value(MetricKind::Co2), Some(650.0));
    assert_eq!(source.remaining(), 1);

    // Third record lacks humidity; replay passes it through untouched
    let third = source.next_reading().await.unwrap().unwrap();
    assert!(third.validate().is_err());

    assert!(source.next_reading().await.unwrap().is_none());
    assert!(source.is_exhausted());
}

#[tokio::test]
async fn test_replay_rewind() {
    let mut source = replay();
    while source.next_reading().await.unwrap().is_some() {}
    source.rewind();
    assert_eq!(source.remaining(), 3);
}

#[test]
fn test_replay_rejects_malformed_export() {
    assert!(matches!(ReplaySource::from_json_str("{\"rows\": []}"), Err(crate::Error::Json(_))));
}

#[test]
fn test_replay_rejects_unrepresentable_timestamp() {
    for time in ["1e19", "1.7976931348623157e308"] {
        let json = format!(r#"{{"readings": [{{"time_ms": {}, "message": {{"rco2": 1}}}}]}}"#, time);
        let err = ReplaySource::from_json_str(&json).unwrap_err();
        assert!(err.is_configuration(), "{} should be rejected", time);
    }
}

#[test]
fn test_replay_from_missing_file_is_io_error() {
    let err = ReplaySource::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, crate::Error::Io(_)));
}

#[test]
fn test_replay_from_path() {
    let path = std::env::temp_dir().join(format!("airgradient-replay-{}.json", std::process::id()));
    std::fs::write(&path, EXPORT).unwrap();

    let source = ReplaySource::from_path(&path).unwrap();
    assert_eq!(source.len(), 3);
    assert_eq!(source.name(), path.display().to_string());

    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_merge_orders_by_timestamp_and_keeps_tags() {
    let a = ReplaySource::from_json_str(r#"{"readings": [{"time_ms": 10, "message": {}}, {"time_ms": 30, "message": {}}]}"#)
        .unwrap()
        .tagged("greencoat");
    let b = ReplaySource::from_json_str(r#"{"readings": [{"time_ms": 20, "message": {}}]}"#)
        .unwrap()
        .tagged("highholborn_302");

    let mut merged = ReplaySource::merge([a, b]).with_interval(Duration::ZERO);
    assert_eq!(merged.name(), "replay+replay");

    let mut tags = Vec::new();
    while let Some(raw) = merged.next_reading().await.unwrap() {
        tags.push(raw.source.unwrap().to_string());
    }
    assert_eq!(tags, vec!["greencoat", "highholborn_302", "greencoat"]);
}

#[test]
fn test_known_building_topics() {
    assert_eq!(KNOWN_DEVICES.len(), 7);
    assert_eq!(topic_for_building("High Holborn HH_308"), Some("airgradient/readings/dc5475bacb84"));
    assert_eq!(topic_for_building("Nowhere"), None);
}

#[test]
fn test_unknown_building_is_configuration_error() {
    let err = SubscriptionSource::for_building("Nowhere", 4).unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_subscription_delivers_and_tags() {
    let (mut source, handle) = SubscriptionSource::for_building("Greencoat GB_G03", 4).unwrap();
    assert_eq!(handle.topic(), Some("airgradient/readings/0cb815082660"));
    assert_eq!(source.name(), "airgradient/readings/0cb815082660");

    handle.publish_json(r#"{"rco2": 800, "atmp": 20, "rhum": 50, "tvoc_index": 1, "pm01": 1, "pm02": 1, "pm10": 1}"#)
        .await
        .unwrap();
    handle.publish(RawReading::new(UNIX_EPOCH).with_source("override")).await.unwrap();

    let first = source.next_reading().await.unwrap().unwrap();
    assert_eq!(first.source, Some(SourceTag::new("Greencoat GB_G03")));
    assert!(first.validate().is_ok());

    let second = source.next_reading().await.unwrap().unwrap();
    assert_eq!(second.source, Some(SourceTag::new("override")));

    drop(handle);
    assert!(source.next_reading().await.unwrap().is_none());
}

#[tokio::test]
async fn test_publish_after_source_dropped_fails() {
    let (source, handle) = SubscriptionSource::channel("test", 1);
    let handle = handle.with_tag("lab");
    assert_eq!(handle.tag(), Some(&SourceTag::new("lab")));
    drop(source);

    assert!(handle.is_closed());
    let err = handle.publish(RawReading::new(UNIX_EPOCH)).await.unwrap_err();
    assert!(matches!(err, crate::Error::Disconnected(_)));
}

#[tokio::test]
async fn test_publish_json_rejects_garbage() {
    let (_source, handle) = SubscriptionSource::channel("test", 1);
    assert!(matches!(handle.publish_json("not json").await, Err(crate::Error::Json(_))));
}

#[tokio::test]
async fn test_feed_source_dispatches_to_strategy() {
    let mut feed = FeedSource::from(replay());
    assert_eq!(feed.name(), "replay");
    assert!(feed.next_reading().await.unwrap().is_some());

    let (source, handle) = SubscriptionSource::channel("live", 2);
    let mut feed = FeedSource::from(source);
    handle.publish(RawReading::new(UNIX_EPOCH)).await.unwrap();
    assert!(feed.next_reading().await.unwrap().is_some());
    assert_eq!(feed.name(), "live");
}

#[tokio::test]
async fn test_into_stream_ends_with_source() {
    let readings: Vec<_> = into_stream(FeedSource::from(replay())).collect().await;
    assert_eq!(readings.len(), 3);
    assert!(readings.iter().all(|r| r.is_ok()));
}
