use std::time::Duration;

/// Default number of readings kept in count mode
pub const DEFAULT_MAX_READINGS: usize = 50;

/// Default retention in time mode, in seconds
pub const DEFAULT_RETENTION_SECS: u64 = 50;

/// Default retention in time mode
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(DEFAULT_RETENTION_SECS);
