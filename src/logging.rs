//! Tracing subscriber setup for binaries and demos
//!
//! The library itself only emits `tracing` events; applications decide where
//! they go. [`init`] installs a formatted stderr subscriber filtered by
//! `RUST_LOG`, defaulting to [`DEFAULT_FILTER`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "airgradient_metrics=info";

/// Installs the global subscriber
///
/// Returns false if a global subscriber was already set.
pub fn init() -> bool {
    init_with_default(DEFAULT_FILTER)
}

/// Installs the global subscriber with a custom fallback filter
pub fn init_with_default(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        let _ = init();
        assert!(!init_with_default("debug"));
    }
}
