//! Register block codec.
//!
//! A single engine maps between raw register bytes and a `DeviceConfig`
//! for any family, driven by that family's static `FamilyLayout`. Each field
//! is extracted from its byte, masked, and either looked up in its legal
//! option table or passed through an affine transform. Encoding is the
//! inverse: every field contributes its canonical bit pattern to its byte,
//! and reserved bits stay clear.
//!
//! Decoding fails fast on the first invalid field, in table order. Encoding
//! never returns a partial block. A configuration read from a device
//! carries no write-only fields; `encode_readable` covers that case.

mod block;
mod error;
mod field;
mod reader;

pub use block::{CommandFrame, RegisterBlock};
pub use error::CodecError;
pub use field::{Access, BlockHead, FamilyLayout, FieldGroup, FieldKind, FieldSpec};

use crate::config::DeviceConfig;
use reader::BlockReader;

/// Decodes a register block into a configuration.
pub fn decode(layout: &FamilyLayout, block: &RegisterBlock) -> Result<DeviceConfig, CodecError> {
    let reader = BlockReader::new(block.as_bytes());
    reader.require_len(layout.block_len)?;

    if let Some(head) = layout.head {
        let value = reader.read_u8(head.offset)?;
        if !head.accepted.contains(&value) {
            return Err(CodecError::InvalidFieldValue {
                field: "HEAD",
                value: format!("0x{value:02x}"),
            });
        }
    }

    let mut cfg = DeviceConfig::new(layout.family);
    for spec in layout.fields {
        let byte = reader.read_u8(spec.offset)?;
        let value = spec.decode(byte)?;
        cfg.fields.insert(spec.name.to_string(), value);
    }
    Ok(cfg)
}

/// Encodes a configuration into a register block.
pub fn encode(layout: &FamilyLayout, cfg: &DeviceConfig) -> Result<RegisterBlock, CodecError> {
    encode_fields(layout, cfg, layout.block_len, |_| true)
}

/// Encodes the registers a config read returns, leaving out write-only
/// fields. For a family without write-only fields this is the full block.
pub fn encode_readable(
    layout: &FamilyLayout,
    cfg: &DeviceConfig,
) -> Result<RegisterBlock, CodecError> {
    encode_fields(layout, cfg, layout.readable_len, |spec| {
        spec.access == Access::ReadWrite
    })
}

fn encode_fields(
    layout: &FamilyLayout,
    cfg: &DeviceConfig,
    len: usize,
    include: impl Fn(&FieldSpec) -> bool,
) -> Result<RegisterBlock, CodecError> {
    if cfg.family != layout.family {
        return Err(CodecError::FamilyMismatch {
            expected: layout.family,
            actual: cfg.family,
        });
    }

    let mut bytes = vec![0u8; len];
    if let Some(head) = layout.head {
        bytes[head.offset] = head.emitted;
    }
    for spec in layout.fields.iter().filter(|spec| include(*spec)) {
        let value = cfg
            .get(spec.name)
            .ok_or(CodecError::MissingField { field: spec.name })?;
        let byte = bytes.get_mut(spec.offset).ok_or(CodecError::BlockLength {
            expected: spec.offset + 1,
            actual: len,
        })?;
        *byte |= spec.encode(value)?;
    }
    Ok(RegisterBlock::new(bytes))
}
