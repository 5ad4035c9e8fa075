//! Background stream driver
//!
//! [`ReadingStream`] pulls readings from a source on a tokio task and feeds
//! them into a shared window, one at a time. It offers the dashboard's
//! play / pause / stop controls:
//!
//! - `play` starts (or resumes) consumption
//! - `pause` halts consumption and keeps the window contents
//! - `stop` halts consumption and empties the window
//!
//! Both `pause` and `stop` may be called any number of times.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use airgradient_metrics::source::ReplaySource;
//! use airgradient_metrics::stream::ReadingStream;
//! use airgradient_metrics::window::{ReadingWindow, WindowConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let window = ReadingWindow::shared(WindowConfig::realtime())?;
//!     window.lock().on_alert(|alert| println!("{}", alert));
//!
//!     let source = ReplaySource::from_path("readings_greencoat.json")?.tagged("greencoat");
//!     let mut stream = ReadingStream::new(window.clone(), source);
//!     stream.play();
//!
//!     tokio::time::sleep(Duration::from_secs(10)).await;
//!     stream.pause().await;
//!     println!("{} readings in window", window.lock().len());
//!     Ok(())
//! }
//! ```

use std::fmt;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

use crate::traits::ReadingSource;
use crate::window::{SharedWindow, WindowSnapshot};

/// Lifecycle of a [`ReadingStream`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Never started, or stopped
    Idle,
    /// Consuming readings
    Playing,
    /// Halted with the window intact
    Paused,
    /// The source ran out of readings
    Finished,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

struct StreamTask<S> {
    running: watch::Sender<bool>,
    handle: JoinHandle<(S, bool)>,
}

/// Drives a reading source into a shared window
pub struct ReadingStream<S: ReadingSource + 'static> {
    window: SharedWindow,
    source: Option<S>,
    task: Option<StreamTask<S>>,
    state: StreamState,
}

impl<S: ReadingSource + 'static> fmt::Debug for ReadingStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadingStream")
            .field("state", &self.state())
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl<S: ReadingSource + 'static> ReadingStream<S> {
    pub fn new(window: SharedWindow, source: S) -> Self {
        Self { window, source: Some(source), task: None, state: StreamState::Idle }
    }

    pub fn window(&self) -> SharedWindow {
        SharedWindow::clone(&self.window)
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        self.window.lock().snapshot()
    }

    pub fn state(&self) -> StreamState {
        match &self.task {
            Some(task) if task.handle.is_finished() => StreamState::Finished,
            Some(_) => StreamState::Playing,
            None => self.state,
        }
    }

    /// The source while the stream is not playing, e.g. to rewind a replay
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Starts consuming on a new tokio task; must be called inside a runtime
    ///
    /// Returns false if the stream is still playing. A task that already
    /// finished is collected first, so a `Finished` stream plays its source
    /// again.
    pub fn play(&mut self) -> bool {
        self.collect_finished();

        let Some(source) = self.source.take() else {
            return false;
        };

        let (running, receiver) = watch::channel(true);
        let handle = tokio::spawn(run(SharedWindow::clone(&self.window), source, receiver));
        self.task = Some(StreamTask { running, handle });
        self.state = StreamState::Playing;
        true
    }

    /// Halts consumption, keeping the window contents
    pub async fn pause(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        let _ = task.running.send(false);
        let result = task.handle.await;
        self.reclaim(result);
        tracing::info!(state = %self.state, "Stream paused");
    }

    /// Halts consumption and empties the window
    pub async fn stop(&mut self) {
        self.pause().await;
        self.window.lock().reset();
        if self.source.is_some() {
            self.state = StreamState::Idle;
        }
    }
}

impl<S: ReadingSource + 'static> ReadingStream<S> {
    fn collect_finished(&mut self) {
        let Some(task) = self.task.as_mut() else {
            return;
        };
        if !task.handle.is_finished() {
            return;
        }

        if let Some(result) = (&mut task.handle).now_or_never() {
            self.task = None;
            self.reclaim(result);
        }
    }

    fn reclaim(&mut self, result: std::result::Result<(S, bool), JoinError>) {
        match result {
            Ok((source, exhausted)) => {
                self.source = Some(source);
                self.state = if exhausted { StreamState::Finished } else { StreamState::Paused };
            }
            Err(e) => {
                tracing::error!(error = %e, "Stream task failed; source lost");
                self.state = StreamState::Finished;
            }
        }
    }
}

impl<S: ReadingSource + 'static> Drop for ReadingStream<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.running.send(false);
        }
    }
}

async fn run<S: ReadingSource>(window: SharedWindow, mut source: S, mut running: watch::Receiver<bool>) -> (S, bool) {
    let name = source.name();
    tracing::info!(source = %name, "Stream started");

    loop {
        let next = tokio::select! {
            biased;
            _ = running.changed() => None,
            next = source.next_reading() => Some(next),
        };

        match next {
            None => return (source, false),
            Some(Ok(Some(raw))) => {
                let result = window.lock().ingest(raw);
                if let Err(e) = result {
                    tracing::warn!(source = %name, error = %e, "Skipping rejected reading");
                }
            }
            Some(Ok(None)) => {
                tracing::info!(source = %name, "Source exhausted");
                return (source, true);
            }
            Some(Err(e)) => {
                tracing::warn!(source = %name, error = %e, "Source error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MetricKind;
    use crate::reading::RawReading;
    use crate::source::{ReplaySource, SubscriptionSource};
    use crate::traits::source::MockReadingSource;
    use crate::window::{ReadingWindow, WindowConfig};
    use std::time::{Duration, UNIX_EPOCH};

    fn zeros(secs: u64) -> RawReading {
        MetricKind::ALL
            .iter()
            .fold(RawReading::new(UNIX_EPOCH + Duration::from_secs(secs)), |raw, kind| raw.with_value(*kind, 0.0))
    }

    async fn wait_until<F: Fn() -> bool>(condition: F) {
        for _ in 0..400 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached in time");
    }

    #[tokio::test]
    async fn test_replay_runs_to_completion() {
        let window = ReadingWindow::shared(WindowConfig::count(3)).unwrap();
        let mut partial = zeros(3);
        partial.remove(MetricKind::Humidity);
        let records = vec![zeros(1), zeros(2), partial, zeros(4), zeros(5)];
        let source = ReplaySource::from_readings("test", records).with_interval(Duration::ZERO);

        let mut stream = ReadingStream::new(window.clone(), source);
        assert_eq!(stream.state(), StreamState::Idle);
        assert!(stream.play());
        assert!(!stream.play());

        wait_until(|| stream.state() == StreamState::Finished).await;
        let snapshot = stream.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.latest().map(|r| r.timestamp()), Some(UNIX_EPOCH + Duration::from_secs(5)));

        stream.pause().await;
        assert_eq!(stream.state(), StreamState::Finished);
        assert!(stream.source_mut().map(|s| s.is_exhausted()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_pause_keeps_window_and_resume_continues() {
        let window = ReadingWindow::shared(WindowConfig::count(10)).unwrap();
        let (source, handle) = SubscriptionSource::channel("live", 8);
        let mut stream = ReadingStream::new(window.clone(), source);

        stream.play();
        handle.publish(zeros(1)).await.unwrap();
        wait_until(|| window.lock().len() == 1).await;

        stream.pause().await;
        stream.pause().await;
        assert_eq!(stream.state(), StreamState::Paused);

        handle.publish(zeros(2)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(window.lock().len(), 1, "paused stream must not ingest");

        stream.play();
        wait_until(|| window.lock().len() == 2).await;
        assert_eq!(stream.state(), StreamState::Playing);
    }

    #[tokio::test]
    async fn test_stop_resets_window() {
        let window = ReadingWindow::shared(WindowConfig::count(10)).unwrap();
        let (source, handle) = SubscriptionSource::channel("live", 8);
        let mut stream = ReadingStream::new(window.clone(), source);

        stream.play();
        handle.publish(zeros(1)).await.unwrap();
        wait_until(|| window.lock().len() == 1).await;

        stream.stop().await;
        assert!(stream.snapshot().is_empty());
        assert_eq!(stream.state(), StreamState::Idle);

        stream.stop().await;
        assert_eq!(stream.state(), StreamState::Idle);
    }

    #[tokio::test]
    async fn test_closed_subscription_finishes_stream() {
        let window = ReadingWindow::shared(WindowConfig::count(10)).unwrap();
        let (source, handle) = SubscriptionSource::channel("live", 8);
        let mut stream = ReadingStream::new(window, source);

        stream.play();
        drop(handle);
        wait_until(|| stream.state() == StreamState::Finished).await;
    }

    #[tokio::test]
    async fn test_play_after_finish_restarts_source() {
        let window = ReadingWindow::shared(WindowConfig::count(10)).unwrap();

        let mut source = MockReadingSource::new();
        let mut calls = 0;
        source.expect_next_reading().returning(move || {
            calls += 1;
            match calls {
                2 => Ok(Some(zeros(3))),
                _ => Ok(None),
            }
        });
        source.expect_name().returning(|| "mock".to_string());

        let mut stream = ReadingStream::new(window.clone(), source);
        assert!(stream.play());
        wait_until(|| stream.state() == StreamState::Finished).await;
        assert!(window.lock().is_empty());

        assert!(stream.play());
        wait_until(|| window.lock().len() == 1).await;
        wait_until(|| stream.state() == StreamState::Finished).await;
    }

    #[tokio::test]
    async fn test_mock_source_errors_are_skipped() {
        let window = ReadingWindow::shared(WindowConfig::count(10)).unwrap();

        let mut source = MockReadingSource::new();
        let mut calls = 0;
        source.expect_next_reading().returning(move || {
            calls += 1;
            match calls {
                1 => Err(crate::Error::disconnected("flaky")),
                2 => Ok(Some(zeros(7))),
                _ => Ok(None),
            }
        });
        source.expect_name().returning(|| "mock".to_string());

        let mut stream = ReadingStream::new(window.clone(), source);
        stream.play();
        wait_until(|| stream.state() == StreamState::Finished).await;

        assert_eq!(window.lock().len(), 1);
    }
}
