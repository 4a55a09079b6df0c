//! Register codec and serial command transport for EBYTE LoRa modules.
//!
//! This crate implements the configuration pipeline used by the CLI: a
//! connector opens one serial link per operation, the transport exchanges a
//! single framed command with the module, and the family codec maps the
//! register block to named fields (and back). Two module families are
//! supported, each described by a static field table:
//! - E22: 9-byte block behind a 3-byte command header, product-info reads.
//! - E32: 6-byte block led by a persistence head, factory reset.
//!
//! Invariants:
//! - `encode(decode(block)) == block` for canonical blocks.
//! - Decoding never substitutes a default for an unknown bit pattern.
//! - A connection never outlives the operation that opened it.
//!
//! # Examples
//! ```
//! use loracfg_core::{DeviceConfig, Family};
//!
//! let cfg = DeviceConfig::defaults(Family::E22)?;
//! let block = Family::E22.encode(&cfg)?;
//! assert_eq!(block.to_string(), "000000620017000000");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod codec;
mod config;
mod families;
mod session;
mod transport;
mod validate;

pub use codec::{
    Access, BlockHead, CodecError, CommandFrame, FamilyLayout, FieldGroup, FieldKind, FieldSpec,
    RegisterBlock, decode, encode, encode_readable,
};
pub use config::{DeviceConfig, FieldValue};
pub use families::{Family, ModuleVersion, Persistence, ReplyError};
pub use session::{ConfigError, Configurator, ErrorCategory, Phase};
pub use transport::{
    Connector, ExchangeOptions, SerialConnector, SerialOptions, StreamTransport, Transport,
    TransportError, hex_dump,
};
pub use validate::{validate, validate_config, validate_value};

/// Tool metadata embedded in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "loracfg").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
    /// Short commit hash of the build, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// A configuration read from a device, as persisted by the operator.
///
/// # Examples
/// ```
/// use loracfg_core::{DeviceConfig, Family, Snapshot, ToolInfo};
///
/// let snapshot = Snapshot {
///     tool: ToolInfo {
///         name: "loracfg".to_string(),
///         version: "0.1.0".to_string(),
///         commit: Some("1a2b3c4".to_string()),
///     },
///     read_at: "1970-01-01T00:00:00Z".to_string(),
///     device: "/dev/ttyUSB0".to_string(),
///     config: DeviceConfig::defaults(Family::E32)?,
/// };
/// assert_eq!(snapshot.config.family, Family::E32);
/// # Ok::<(), loracfg_core::CodecError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the read.
    pub read_at: String,
    /// Serial device the configuration was read from.
    pub device: String,
    /// Decoded configuration.
    pub config: DeviceConfig,
}
