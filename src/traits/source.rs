use async_trait::async_trait;

use crate::error::Result;
use crate::reading::RawReading;

#[cfg(test)]
use mockall::automock;

/// A feed of raw readings
///
/// Implementors hand out readings one at a time. Validation is the window's
/// job, so sources pass through whatever the device produced.
///
/// # Examples
///
/// ```rust
/// use airgradient_metrics::traits::ReadingSource;
/// use airgradient_metrics::reading::RawReading;
/// use airgradient_metrics::Result;
///
/// struct Empty;
///
/// #[async_trait::async_trait]
/// impl ReadingSource for Empty {
///     async fn next_reading(&mut self) -> Result<Option<RawReading>> {
///         Ok(None)
///     }
///
///     fn name(&self) -> String {
///         "empty".to_string()
///     }
/// }
/// ```
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReadingSource: Send {
    /// Waits for the next reading; `Ok(None)` once the source is exhausted or closed
    async fn next_reading(&mut self) -> Result<Option<RawReading>>;

    /// Short description used in logs
    fn name(&self) -> String;
}

#[async_trait]
impl<S: ReadingSource + ?Sized> ReadingSource for Box<S> {
    async fn next_reading(&mut self) -> Result<Option<RawReading>> {
        (**self).next_reading().await
    }

    fn name(&self) -> String {
        (**self).name()
    }
}
