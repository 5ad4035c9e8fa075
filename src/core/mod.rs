// Core modules
pub mod events;
pub mod metrics;
pub mod types;

/// Core prelude module that re-exports the shared building blocks
pub mod prelude {
    pub use super::events::{Callback, Subscribers};
    pub use super::metrics::{Metric, MetricSeries};
    pub use super::types::{MetricKind, SourceTag};
}
