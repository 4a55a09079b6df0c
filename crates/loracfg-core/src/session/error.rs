use thiserror::Error;

use crate::codec::CodecError;
use crate::families::{Family, ReplyError};
use crate::transport::TransportError;

/// Errors returned by configurator operations.
///
/// # Examples
/// ```
/// use loracfg_core::{ConfigError, ErrorCategory, Family};
///
/// let err = ConfigError::Unsupported { family: Family::E22, operation: "factory-reset" };
/// assert_eq!(err.category(), ErrorCategory::Input);
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Reply(#[from] ReplyError),
    #[error("device returned an undecodable configuration: {0}")]
    Decode(#[source] CodecError),
    #[error("configuration rejected before sending: {0}")]
    Invalid(#[source] CodecError),
    #[error("{family} modules do not support {operation}")]
    Unsupported {
        family: Family,
        operation: &'static str,
    },
}

/// Which side of the exchange an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The serial port could not be opened or the exchange failed.
    Port,
    /// The module answered with data that does not fit the protocol.
    Device,
    /// The operator asked for something illegal; nothing was sent.
    Input,
}

impl ConfigError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConfigError::Transport(_) => ErrorCategory::Port,
            ConfigError::Reply(_) | ConfigError::Decode(_) => ErrorCategory::Device,
            ConfigError::Invalid(_) | ConfigError::Unsupported { .. } => ErrorCategory::Input,
        }
    }
}
