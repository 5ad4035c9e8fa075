use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::constants::topic_for_building;
use crate::core::types::SourceTag;
use crate::error::{Error, Result};
use crate::reading::RawReading;
use crate::traits::ReadingSource;

/// Push-fed source; the broker glue publishes through a [`SubscriptionHandle`]
///
/// The source reports exhaustion once every handle has been dropped and the
/// buffer is drained.
#[derive(Debug)]
pub struct SubscriptionSource {
    name: String,
    receiver: mpsc::Receiver<RawReading>,
}

/// Publishing side of a subscription
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    tag: Option<SourceTag>,
    topic: Option<String>,
    sender: mpsc::Sender<RawReading>,
}

impl SubscriptionSource {
    /// Creates an untagged subscription buffering up to `capacity` readings
    pub fn channel(name: impl Into<String>, capacity: usize) -> (Self, SubscriptionHandle) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { name: name.into(), receiver }, SubscriptionHandle { tag: None, topic: None, sender })
    }

    /// Creates a subscription for a known building, tagging its readings
    pub fn for_building(building: &str, capacity: usize) -> Result<(Self, SubscriptionHandle)> {
        let topic = topic_for_building(building)
            .ok_or_else(|| Error::invalid_configuration("Unknown building", building))?;

        let (source, mut handle) = Self::channel(topic, capacity);
        handle.tag = Some(SourceTag::new(building));
        handle.topic = Some(topic.to_string());
        tracing::info!(building, topic, "Created building subscription");
        Ok((source, handle))
    }
}

impl SubscriptionHandle {
    /// Tags readings published through this handle that carry no source of their own
    pub fn with_tag(mut self, tag: impl Into<SourceTag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn tag(&self) -> Option<&SourceTag> {
        self.tag.as_ref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Delivers a reading, waiting while the buffer is full
    pub async fn publish(&self, mut raw: RawReading) -> Result<()> {
        if raw.source.is_none() {
            raw.source = self.tag.clone();
        }
        self.sender.send(raw).await.map_err(|_| Error::disconnected("subscription source was dropped"))
    }

    /// Parses a telemetry message and publishes it stamped with the arrival time
    pub async fn publish_json(&self, payload: &str) -> Result<()> {
        let raw = RawReading::from_json_str(payload, SystemTime::now())?;
        self.publish(raw).await
    }
}

#[async_trait]
impl ReadingSource for SubscriptionSource {
    async fn next_reading(&mut self) -> Result<Option<RawReading>> {
        Ok(self.receiver.recv().await)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
