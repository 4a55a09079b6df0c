use std::time::Duration;

use thiserror::Error;

/// Errors raised while opening a link or exchanging a command.
///
/// # Examples
/// ```
/// use loracfg_core::TransportError;
/// use std::time::Duration;
///
/// let err = TransportError::NoResponse { timeout: Duration::from_secs(1) };
/// assert_eq!(err.to_string(), "no response within 1000 ms");
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open {device}: {reason}")]
    PortOpenFailed { device: String, reason: String },
    #[error("no response within {} ms", .timeout.as_millis())]
    NoResponse { timeout: Duration },
    #[error("write failed: {0}")]
    WriteFailed(#[source] std::io::Error),
    #[error("read failed: {0}")]
    ReadFailed(#[source] std::io::Error),
    #[error("module returned no data")]
    EmptyRead,
    #[error("failed to start exchange worker: {0}")]
    Spawn(#[source] std::io::Error),
}
