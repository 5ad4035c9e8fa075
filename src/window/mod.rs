//! Reading window management
//!
//! [`ReadingWindow`] owns the bounded collection of recent readings. Every
//! ingest validates the incoming sample, appends it, evicts whatever falls
//! outside the retention bound, checks alert thresholds and notifies
//! subscribers. An ingest either completes all of these steps or rejects the
//! reading without touching the window.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use std::time::{Duration, UNIX_EPOCH};
//! use airgradient_metrics::core::types::MetricKind;
//! use airgradient_metrics::reading::RawReading;
//! use airgradient_metrics::window::{ReadingWindow, WindowConfig};
//!
//! let mut window = ReadingWindow::new(WindowConfig::count(3)).unwrap();
//!
//! let alerts = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&alerts);
//! window.on_alert(move |alert| sink.lock().unwrap().push(alert.metric_names()));
//!
//! for secs in 1..=4 {
//!     let mut raw = RawReading::new(UNIX_EPOCH + Duration::from_secs(secs));
//!     for kind in MetricKind::ALL {
//!         raw.set(kind, 0.0);
//!     }
//!     window.ingest(raw).unwrap();
//! }
//!
//! assert_eq!(window.snapshot().len(), 3);
//! assert!(alerts.lock().unwrap().is_empty());
//! ```

/// Window defaults
pub mod constants;

mod types;

pub use types::*;

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::alert::{Alert, ThresholdTable};
use crate::core::events::Subscribers;
use crate::core::types::SourceTag;
use crate::error::Result;
use crate::reading::{RawReading, Reading};

use constants::DEFAULT_MAX_READINGS;

/// Predicate deciding whether readings from a source are retained
pub type SourceFilter = Box<dyn Fn(Option<&SourceTag>) -> bool + Send + Sync>;

/// Window shared between a stream driver and its readers
pub type SharedWindow = Arc<parking_lot::Mutex<ReadingWindow>>;

/// Bounded, time- or count-limited collection of validated readings
pub struct ReadingWindow {
    config: WindowConfig,
    readings: VecDeque<Reading>,
    newest: Option<SystemTime>,
    filter: Option<SourceFilter>,
    alert_subscribers: Subscribers<Alert>,
    update_subscribers: Subscribers<WindowSnapshot>,
}

impl fmt::Debug for ReadingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadingWindow")
            .field("config", &self.config)
            .field("len", &self.readings.len())
            .field("newest", &self.newest)
            .field("filter", &if self.filter.is_some() { "Some(<filter>)" } else { "None" })
            .field("alert_subscribers", &self.alert_subscribers)
            .field("update_subscribers", &self.update_subscribers)
            .finish()
    }
}

impl ReadingWindow {
    /// Creates an empty window, rejecting a non-positive retention bound
    pub fn new(config: WindowConfig) -> Result<Self> {
        config.retention.validate()?;

        let capacity = match config.retention {
            RetentionPolicy::Count(max) => max.min(DEFAULT_MAX_READINGS).saturating_add(1),
            RetentionPolicy::Time(_) => 0,
        };

        Ok(Self {
            config,
            readings: VecDeque::with_capacity(capacity),
            newest: None,
            filter: None,
            alert_subscribers: Subscribers::new(),
            update_subscribers: Subscribers::new(),
        })
    }

    /// Wraps a new window for sharing with a stream driver
    pub fn shared(config: WindowConfig) -> Result<SharedWindow> {
        Ok(Arc::new(parking_lot::Mutex::new(Self::new(config)?)))
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.config.thresholds
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Validates and ingests one reading, returning the resulting window contents
    ///
    /// Rejected readings leave the window untouched and fire no events.
    /// Readings excluded by the source filter are dropped silently and the
    /// current contents are returned.
    pub fn ingest(&mut self, raw: RawReading) -> Result<WindowSnapshot> {
        let reading = raw.validate()?;

        if let Some(filter) = &self.filter {
            if !filter(reading.source()) {
                tracing::trace!(source = ?reading.source(), "Reading excluded by source filter");
                return Ok(self.snapshot());
            }
        }

        let alert = self.config.thresholds.evaluate(&reading);

        self.newest = Some(match self.newest {
            Some(newest) if newest > reading.timestamp() => newest,
            _ => reading.timestamp(),
        });
        self.readings.push_back(reading);
        let evicted = self.evict();

        tracing::debug!(len = self.readings.len(), evicted, "Ingested reading");

        if let Some(alert) = alert {
            tracing::warn!(source = ?alert.source, metrics = ?alert.metric_names(), "{}", alert.message());
            self.alert_subscribers.notify(&alert);
        }

        let snapshot = self.snapshot();
        self.update_subscribers.notify(&snapshot);
        Ok(snapshot)
    }

    /// Current contents, oldest first
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot::new(self.readings.iter().cloned().collect())
    }

    /// Empties the window; filter and subscribers are kept
    pub fn reset(&mut self) {
        if !self.readings.is_empty() {
            tracing::debug!(dropped = self.readings.len(), "Window reset");
        }
        self.readings.clear();
        self.newest = None;
    }

    /// Restricts subsequent ingests to readings whose source passes `predicate`
    ///
    /// Readings already held are not re-examined.
    pub fn set_filter<F>(&mut self, predicate: F)
    where
        F: Fn(Option<&SourceTag>) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
    }

    /// Convenience filter keeping only readings tagged with `tag`
    pub fn only_source(&mut self, tag: impl Into<SourceTag>) {
        let tag = tag.into();
        self.set_filter(move |source| source == Some(&tag));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Registers a callback fired once per ingest that breaches any ceiling
    pub fn on_alert<F>(&self, callback: F)
    where
        F: Fn(&Alert) + Send + Sync + 'static,
    {
        self.alert_subscribers.subscribe(callback);
    }

    /// Registers a callback fired with the new contents after every accepted ingest
    pub fn on_update<F>(&self, callback: F)
    where
        F: Fn(&WindowSnapshot) + Send + Sync + 'static,
    {
        self.update_subscribers.subscribe(callback);
    }

    fn evict(&mut self) -> usize {
        let before = self.readings.len();

        match self.config.retention {
            RetentionPolicy::Count(max) => {
                while self.readings.len() > max {
                    self.readings.pop_front();
                }
            }
            RetentionPolicy::Time(retention) => {
                let cutoff = self.newest.and_then(|newest| newest.checked_sub(retention));
                if let Some(cutoff) = cutoff {
                    self.readings.retain(|r| r.timestamp() >= cutoff);
                }
            }
        }

        before - self.readings.len()
    }
}
