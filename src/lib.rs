//! AirGradient Metrics - A Rust library for monitoring indoor air quality readings
//!
//! This crate keeps a bounded window of recent readings from AirGradient
//! sensors, raises threshold alerts as readings arrive and hands consistent
//! snapshots to whatever renders them. Readings come either from a recorded
//! export replayed at a fixed pace or from a live subscription fed by broker
//! glue.
//!
//! # Features
//!
//! - **Reading Window**: Count- or time-bounded retention with atomic ingest
//! - **Alerts**: Per-metric ceilings, one alert per breaching reading
//! - **Source Filter**: Keep only readings from selected devices
//! - **Sources**: Replay of historical exports and push-fed subscriptions
//! - **Stream Driver**: Play, pause and stop consumption on a tokio task (`stream` feature)
//! - **Analysis**: Statistics, averages and air-quality bands for snapshots
//!
//! # Examples
//!
//! ```rust
//! use std::time::{Duration, UNIX_EPOCH};
//! use airgradient_metrics::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut window = ReadingWindow::new(WindowConfig::count(3))?;
//!     window.on_alert(|alert| println!("{}", alert));
//!
//!     let raw = MetricKind::ALL
//!         .iter()
//!         .fold(RawReading::new(UNIX_EPOCH + Duration::from_secs(1)), |raw, kind| raw.with_value(*kind, 0.0))
//!         .with_value(MetricKind::Co2, 1200.0);
//!
//!     let snapshot = window.ingest(raw)?;
//!     assert_eq!(snapshot.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Rejected readings surface as [`Error::Validation`] and leave the window
//! untouched. Bad settings are reported at construction time:
//!
//! ```rust
//! use airgradient_metrics::window::{ReadingWindow, WindowConfig};
//!
//! let err = ReadingWindow::new(WindowConfig::count(0)).unwrap_err();
//! assert!(err.is_configuration());
//! ```
//!
//! # Thread Safety
//!
//! A [`window::ReadingWindow`] is `Send + Sync` and is shared between a
//! stream driver and readers as a [`window::SharedWindow`]. Subscriber
//! callbacks run on the ingesting thread while the window is locked, so they
//! must not call back into the same window.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod reading;
pub mod source;
#[cfg(feature = "stream")]
pub mod stream;
pub mod traits;
pub mod window;

pub use error::{Error, Result, ValidationError};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::alert::{Alert, Breach, ThresholdTable};
    pub use crate::analysis::{AirQualityCategory, MetricAverages, MetricStats};
    pub use crate::config::MonitorConfig;
    pub use crate::core::prelude::*;
    pub use crate::reading::{RawReading, Reading};
    pub use crate::source::{FeedSource, ReplaySource, SubscriptionHandle, SubscriptionSource};
    #[cfg(feature = "stream")]
    pub use crate::stream::{ReadingStream, StreamState};
    pub use crate::traits::ReadingSource;
    pub use crate::window::{ReadingWindow, RetentionPolicy, SharedWindow, WindowConfig, WindowSnapshot};
    pub use crate::{Error, Result, ValidationError};
}
