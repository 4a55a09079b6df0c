use thiserror::Error;

/// Errors returned when a module reply does not match its command.
///
/// # Examples
/// ```
/// use loracfg_core::ReplyError;
///
/// let err = ReplyError::UnexpectedLength { command: "get-config", expected: 10, actual: 9 };
/// assert!(err.to_string().contains("expected 10 bytes"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("unexpected {command} reply length: expected {expected} bytes, got {actual}")]
    UnexpectedLength {
        command: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("unexpected {command} reply header: expected {expected}, got {actual}")]
    UnexpectedHeader {
        command: &'static str,
        expected: String,
        actual: String,
    },
    #[error("module rejected {command} command (wrong format)")]
    Rejected { command: &'static str },
    #[error("{command} not confirmed: sent {sent}, module holds {received}")]
    EchoMismatch {
        command: &'static str,
        sent: String,
        received: String,
    },
}
