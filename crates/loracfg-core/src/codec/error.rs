use thiserror::Error;

use crate::families::Family;

/// Errors returned by register decoding, encoding and field validation.
///
/// # Examples
/// ```
/// use loracfg_core::CodecError;
///
/// let err = CodecError::InvalidFieldValue {
///     field: "UARTRate",
///     value: "12345".to_string(),
/// };
/// assert!(err.to_string().contains("UARTRate"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid value for {field}: {value}")]
    InvalidFieldValue { field: &'static str, value: String },
    #[error("unknown field: {field}")]
    UnknownField { field: String },
    #[error("missing field: {field}")]
    MissingField { field: &'static str },
    #[error("register block length: need {expected} bytes, got {actual}")]
    BlockLength { expected: usize, actual: usize },
    #[error("configuration is for {actual}, expected {expected}")]
    FamilyMismatch { expected: Family, actual: Family },
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
