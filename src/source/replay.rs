use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::constants::DEFAULT_REPLAY_INTERVAL_MS;
use crate::core::types::{system_time_from_secs, SourceTag};
use crate::error::{Error, Result};
use crate::reading::RawReading;
use crate::traits::ReadingSource;

/// Historical export as written by the AirGradient logger
#[derive(Debug, Deserialize)]
struct ReplayFile {
    readings: Vec<ReplayRecord>,
}

#[derive(Debug, Deserialize)]
struct ReplayRecord {
    /// Epoch seconds, despite the name
    time_ms: f64,
    message: Map<String, Value>,
}

/// Replays recorded readings, optionally paced at a fixed interval
#[derive(Debug, Clone)]
pub struct ReplaySource {
    name: String,
    records: Vec<RawReading>,
    position: usize,
    interval: Duration,
}

impl ReplaySource {
    /// Builds a source from already-decoded readings
    pub fn from_readings(name: impl Into<String>, records: Vec<RawReading>) -> Self {
        Self {
            name: name.into(),
            records,
            position: 0,
            interval: Duration::from_millis(DEFAULT_REPLAY_INTERVAL_MS),
        }
    }

    /// Parses an export of the form `{"readings": [{"time_ms": .., "message": {..}}, ..]}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ReplayFile = serde_json::from_str(json)?;
        let records = file
            .readings
            .iter()
            .map(|record| {
                let timestamp = system_time_from_secs(record.time_ms)
                    .ok_or_else(|| Error::invalid_configuration("Replay timestamp out of range", record.time_ms))?;
                Ok(RawReading::from_payload(&record.message, timestamp))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_readings("replay", records))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let mut source = Self::from_json_str(&json)?;
        source.name = path.display().to_string();
        tracing::debug!(path = %path.display(), records = source.len(), "Loaded replay file");
        Ok(source)
    }

    /// Combines several replays into one, ordered by timestamp
    ///
    /// Records with equal timestamps keep the order of the inputs.
    pub fn merge(sources: impl IntoIterator<Item = ReplaySource>) -> Self {
        let mut names = Vec::new();
        let mut records = Vec::new();
        let mut interval = None;
        for source in sources {
            interval.get_or_insert(source.interval);
            names.push(source.name);
            records.extend(source.records.into_iter().skip(source.position));
        }
        records.sort_by_key(|r| r.timestamp);

        let mut merged = Self::from_readings(names.join("+"), records);
        if let Some(interval) = interval {
            merged.interval = interval;
        }
        merged
    }

    /// Tags every record with `tag`
    pub fn tagged(mut self, tag: impl Into<SourceTag>) -> Self {
        let tag = tag.into();
        for record in &mut self.records {
            record.source = Some(tag.clone());
        }
        self
    }

    /// Sets the pause between readings; zero replays as fast as it is polled
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.records.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.records.len()
    }

    /// Starts the replay over from the first record
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

#[async_trait]
impl ReadingSource for ReplaySource {
    async fn next_reading(&mut self) -> Result<Option<RawReading>> {
        if self.is_exhausted() {
            return Ok(None);
        }

        // The first record is emitted immediately, like the dashboard's timer
        if self.position > 0 && !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }

        let record = self.records[self.position].clone();
        self.position += 1;
        Ok(Some(record))
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
