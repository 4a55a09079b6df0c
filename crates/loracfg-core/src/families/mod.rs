//! Module families.
//!
//! Each family follows the same layered structure:
//! - `layout`: register offsets, masks and opcodes (source of truth)
//! - `table`: the static field table driving the generic codec
//! - `frames`: command construction and reply checks
//!
//! Frames are pure and contain no I/O; the session layer drives the
//! transport.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{self, CodecError, CommandFrame, FamilyLayout, RegisterBlock};
use crate::config::DeviceConfig;

pub mod e22;
pub mod e32;
mod error;
mod reply;

pub use error::ReplyError;

/// Supported module families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Family A: 9-byte register block, product-info reads.
    E22,
    /// Family B: 6-byte register block, factory reset.
    E32,
}

/// Whether a written configuration survives a power cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Persistence {
    #[default]
    Saved,
    Temporary,
}

/// E32 module identification returned by the version command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleVersion {
    pub model: u8,
    pub version: u8,
    pub features: u8,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::E22, Family::E32];

    pub fn layout(self) -> &'static FamilyLayout {
        match self {
            Family::E22 => &e22::LAYOUT,
            Family::E32 => &e32::LAYOUT,
        }
    }

    pub fn decode(self, block: &RegisterBlock) -> Result<DeviceConfig, CodecError> {
        codec::decode(self.layout(), block)
    }

    pub fn encode(self, cfg: &DeviceConfig) -> Result<RegisterBlock, CodecError> {
        codec::encode(self.layout(), cfg)
    }

    pub fn encode_readable(self, cfg: &DeviceConfig) -> Result<RegisterBlock, CodecError> {
        codec::encode_readable(self.layout(), cfg)
    }

    /// Encodes the block a write sends: the full block when write-only
    /// fields are set, the readable registers otherwise.
    pub fn encode_for_write(self, cfg: &DeviceConfig) -> Result<RegisterBlock, CodecError> {
        if cfg.holds_write_only() {
            self.encode(cfg)
        } else {
            self.encode_readable(cfg)
        }
    }

    pub fn get_config_command(self) -> CommandFrame {
        match self {
            Family::E22 => e22::frames::get_config(),
            Family::E32 => e32::frames::get_config(),
        }
    }

    pub fn set_config_command(self, block: &RegisterBlock, persistence: Persistence) -> CommandFrame {
        match self {
            Family::E22 => e22::frames::set_config(block, persistence),
            Family::E32 => e32::frames::set_config(block, persistence),
        }
    }

    /// Extracts the register block carried by a get-config reply.
    pub fn parse_config_reply(self, reply: &[u8]) -> Result<RegisterBlock, ReplyError> {
        match self {
            Family::E22 => e22::frames::parse_config_reply(reply),
            Family::E32 => e32::frames::parse_config_reply(reply),
        }
    }

    /// Checks the module's acknowledgement of a set command.
    pub fn check_write_reply(self, frame: &CommandFrame, reply: &[u8]) -> Result<(), ReplyError> {
        match self {
            Family::E22 => e22::frames::check_write_reply(frame, reply),
            Family::E32 => e32::frames::check_write_reply(frame, reply),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::E22 => f.write_str("E22"),
            Family::E32 => f.write_str("E32"),
        }
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "e22" | "a" => Ok(Family::E22),
            "e32" | "b" => Ok(Family::E32),
            _ => Err(format!("unknown module family '{s}' (expected e22 or e32)")),
        }
    }
}
