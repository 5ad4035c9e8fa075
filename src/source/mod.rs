//! Reading sources
//!
//! Two strategies feed a window:
//!
//! - [`ReplaySource`] replays a historical export, paced like a live feed
//! - [`SubscriptionSource`] receives readings pushed by telemetry glue
//!
//! [`FeedSource`] selects one of them at construction time.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use airgradient_metrics::source::{FeedSource, ReplaySource};
//! use airgradient_metrics::traits::ReadingSource;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> airgradient_metrics::Result<()> {
//! let json = r#"{"readings": [{"time_ms": 1715000000, "message": {"rco2": 620}}]}"#;
//! let replay = ReplaySource::from_json_str(json)?.with_interval(Duration::ZERO);
//! let mut feed = FeedSource::from(replay);
//!
//! let first = feed.next_reading().await?.unwrap();
//! assert!(first.validate().is_err(), "partial record");
//! assert!(feed.next_reading().await?.is_none());
//! # Ok(())
//! # }
//! ```

/// Source defaults and the known-device registry
pub mod constants;

mod replay;
mod subscription;

pub use replay::ReplaySource;
pub use subscription::{SubscriptionHandle, SubscriptionSource};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::Result;
use crate::reading::RawReading;
use crate::traits::ReadingSource;

/// Feed strategy chosen when the monitor is built
#[derive(Debug)]
pub enum FeedSource {
    Replay(ReplaySource),
    Subscription(SubscriptionSource),
}

impl From<ReplaySource> for FeedSource {
    fn from(source: ReplaySource) -> Self {
        Self::Replay(source)
    }
}

impl From<SubscriptionSource> for FeedSource {
    fn from(source: SubscriptionSource) -> Self {
        Self::Subscription(source)
    }
}

#[async_trait]
impl ReadingSource for FeedSource {
    async fn next_reading(&mut self) -> Result<Option<RawReading>> {
        match self {
            Self::Replay(source) => source.next_reading().await,
            Self::Subscription(source) => source.next_reading().await,
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Replay(source) => source.name(),
            Self::Subscription(source) => source.name(),
        }
    }
}

/// Adapts any source into a stream that ends when the source is exhausted
pub fn into_stream<S>(source: S) -> BoxStream<'static, Result<RawReading>>
where
    S: ReadingSource + 'static,
{
    stream::unfold(source, |mut source| async move {
        match source.next_reading().await {
            Ok(Some(raw)) => Some((Ok(raw), source)),
            Ok(None) => None,
            Err(e) => Some((Err(e), source)),
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests;
