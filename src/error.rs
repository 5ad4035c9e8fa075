use crate::core::types::MetricKind;

/// Reasons a raw reading is rejected at ingestion
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Reading is missing metric {0}")]
    MissingMetric(MetricKind),

    #[error("Value for {metric} is not a finite number: {value}")]
    NonFiniteValue { metric: MetricKind, value: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid reading: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration: {context} (got {value})")]
    InvalidConfiguration { context: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source disconnected: {0}")]
    Disconnected(String),

    #[error("No data available: {0}")]
    NoData(String),
}

impl Error {
    pub(crate) fn invalid_configuration<C: Into<String>, V: ToString>(context: C, value: V) -> Self {
        Error::InvalidConfiguration { context: context.into(), value: value.to_string() }
    }

    pub(crate) fn disconnected<S: Into<String>>(msg: S) -> Self {
        Error::Disconnected(msg.into())
    }

    pub(crate) fn no_data<S: Into<String>>(msg: S) -> Self {
        Error::NoData(msg.into())
    }

    /// Returns true when the error rejected a reading rather than a configuration
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns true for construction-time configuration failures
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration { .. })
    }
}

/// Result type for airgradient-metrics operations
pub type Result<T> = std::result::Result<T, Error>;
