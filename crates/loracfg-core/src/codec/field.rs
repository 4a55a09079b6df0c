use serde::Serialize;

use super::error::CodecError;
use crate::config::FieldValue;
use crate::families::Family;

/// Form group a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    Address,
    Uart,
    Wireless,
    Wor,
    Crypto,
}

/// Whether a field can be read back from the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    ReadWrite,
    /// Read back as zero; only meaningful on write.
    WriteOnly,
}

impl FieldGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldGroup::Address => "address",
            FieldGroup::Uart => "uart",
            FieldGroup::Wireless => "wireless",
            FieldGroup::Wor => "wor",
            FieldGroup::Crypto => "crypto",
        }
    }
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::ReadWrite => "read-write",
            Access::WriteOnly => "write-only",
        }
    }
}

/// Bit-level encoding of a field within its register byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole byte, 0..=255.
    Byte,
    /// Bit-packed enumeration. The first pattern listed for a label is the
    /// one emitted on encode.
    Choice {
        mask: u8,
        options: &'static [(u8, &'static str)],
    },
    /// Single bit.
    Flag { mask: u8 },
    /// `value = base + index * step` where `index = (byte & mask) >> shift`.
    Linear {
        mask: u8,
        base: u32,
        step: u32,
        max_index: u8,
    },
}

impl FieldKind {
    /// Bits of the register byte owned by this field.
    pub fn mask(&self) -> u8 {
        match *self {
            FieldKind::Byte => 0xFF,
            FieldKind::Choice { mask, .. }
            | FieldKind::Flag { mask }
            | FieldKind::Linear { mask, .. } => mask,
        }
    }
}

/// One entry of a family's static field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub group: FieldGroup,
    pub offset: usize,
    pub access: Access,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Decodes this field from its register byte.
    pub fn decode(&self, byte: u8) -> Result<FieldValue, CodecError> {
        match self.kind {
            FieldKind::Byte => Ok(FieldValue::Number(u32::from(byte))),
            FieldKind::Choice { mask, options } => {
                let pattern = byte & mask;
                options
                    .iter()
                    .find(|(candidate, _)| *candidate == pattern)
                    .map(|(_, label)| FieldValue::Label((*label).to_string()))
                    .ok_or_else(|| self.invalid(format!("0x{pattern:02x}")))
            }
            FieldKind::Flag { mask } => Ok(FieldValue::Flag(byte & mask != 0)),
            FieldKind::Linear {
                mask,
                base,
                step,
                max_index,
            } => {
                let index = (byte & mask) >> mask.trailing_zeros();
                if index > max_index {
                    return Err(self.invalid(format!("index {index}")));
                }
                Ok(FieldValue::Number(base + u32::from(index) * step))
            }
        }
    }

    /// Maps a human value back to its bit pattern, already shifted into
    /// position within the register byte.
    pub fn encode(&self, value: &FieldValue) -> Result<u8, CodecError> {
        match self.kind {
            FieldKind::Byte => {
                let number = self.number(value)?;
                u8::try_from(number).map_err(|_| self.invalid(number.to_string()))
            }
            FieldKind::Choice { options, .. } => {
                let label = value.to_string();
                options
                    .iter()
                    .find(|(_, candidate)| *candidate == label)
                    .map(|(pattern, _)| *pattern)
                    .ok_or_else(|| self.invalid(label))
            }
            FieldKind::Flag { mask } => match value {
                FieldValue::Flag(true) => Ok(mask),
                FieldValue::Flag(false) => Ok(0),
                FieldValue::Label(text) => match parse_flag(text) {
                    Some(true) => Ok(mask),
                    Some(false) => Ok(0),
                    None => Err(self.invalid(text.clone())),
                },
                other => Err(self.invalid(other.to_string())),
            },
            FieldKind::Linear {
                mask,
                base,
                step,
                max_index,
            } => {
                let number = self.number(value)?;
                let offset = number
                    .checked_sub(base)
                    .filter(|offset| offset % step == 0)
                    .ok_or_else(|| self.invalid(number.to_string()))?;
                let index = offset / step;
                if index > u32::from(max_index) {
                    return Err(self.invalid(number.to_string()));
                }
                Ok(((index as u8) << mask.trailing_zeros()) & mask)
            }
        }
    }

    /// Parses an operator-entered label into a legal value for this field.
    pub fn parse(&self, text: &str) -> Result<FieldValue, CodecError> {
        let text = text.trim();
        let value = match self.kind {
            FieldKind::Byte | FieldKind::Linear { .. } => {
                FieldValue::Number(parse_number(text).ok_or_else(|| self.invalid(text.to_string()))?)
            }
            FieldKind::Choice { .. } => FieldValue::Label(text.to_string()),
            FieldKind::Flag { .. } => {
                FieldValue::Flag(parse_flag(text).ok_or_else(|| self.invalid(text.to_string()))?)
            }
        };
        self.encode(&value)?;
        Ok(value)
    }

    /// Human labels of every legal value, in table order.
    pub fn legal_values(&self) -> Vec<String> {
        match self.kind {
            FieldKind::Byte => vec!["0..=255".to_string()],
            FieldKind::Choice { options, .. } => {
                let mut labels: Vec<String> = Vec::new();
                for (_, label) in options {
                    if !labels.iter().any(|seen| seen == label) {
                        labels.push((*label).to_string());
                    }
                }
                labels
            }
            FieldKind::Flag { .. } => vec!["true".to_string(), "false".to_string()],
            FieldKind::Linear {
                base,
                step,
                max_index,
                ..
            } => (0..=u32::from(max_index))
                .map(|index| (base + index * step).to_string())
                .collect(),
        }
    }

    fn number(&self, value: &FieldValue) -> Result<u32, CodecError> {
        match value {
            FieldValue::Number(number) => Ok(*number),
            FieldValue::Label(text) => {
                parse_number(text.trim()).ok_or_else(|| self.invalid(text.clone()))
            }
            FieldValue::Flag(flag) => Err(self.invalid(flag.to_string())),
        }
    }

    fn invalid(&self, value: String) -> CodecError {
        CodecError::InvalidFieldValue {
            field: self.name,
            value,
        }
    }
}

/// Persistence head leading a register block (E32).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHead {
    pub offset: usize,
    pub accepted: &'static [u8],
    pub emitted: u8,
}

/// Static description of one family's register block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyLayout {
    pub family: Family,
    pub block_len: usize,
    /// Leading registers returned by a config read.
    pub readable_len: usize,
    pub head: Option<BlockHead>,
    pub fields: &'static [FieldSpec],
    pub defaults: &'static [u8],
}

impl FamilyLayout {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Bits of the byte at `offset` not owned by any field (nor the head).
    pub fn reserved_bits(&self, offset: usize) -> u8 {
        if self.head.is_some_and(|head| head.offset == offset) {
            return 0;
        }
        let owned = self
            .fields
            .iter()
            .filter(|spec| spec.offset == offset)
            .fold(0u8, |acc, spec| acc | spec.kind.mask());
        !owned
    }
}

fn parse_number(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
