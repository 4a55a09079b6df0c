use std::fmt;

use super::error::CodecError;

/// Raw register bytes as transmitted over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBlock {
    bytes: Vec<u8>,
}

impl RegisterBlock {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }

    /// Parses hex text. Tokens may be separated by whitespace, `:`, `-` or
    /// `,`, and each token may carry its own `0x` prefix.
    ///
    /// # Examples
    /// ```
    /// use loracfg_core::RegisterBlock;
    ///
    /// let block = RegisterBlock::from_hex("c0 00 00 1a 17 44")?;
    /// assert_eq!(block.as_bytes(), &[0xC0, 0x00, 0x00, 0x1A, 0x17, 0x44]);
    /// let block = RegisterBlock::from_hex("0xc0, 0x00, 0x00, 0x1a, 0x17, 0x44")?;
    /// assert_eq!(block.len(), 6);
    /// # Ok::<(), loracfg_core::CodecError>(())
    /// ```
    pub fn from_hex(text: &str) -> Result<Self, CodecError> {
        let digits: String = text
            .split(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | ','))
            .map(|token| {
                token
                    .strip_prefix("0x")
                    .or_else(|| token.strip_prefix("0X"))
                    .unwrap_or(token)
            })
            .collect();
        base16::decode(digits.as_bytes())
            .map(Self::new)
            .map_err(|err| CodecError::InvalidHex(err.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for RegisterBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base16::encode_lower(&self.bytes))
    }
}

/// Opcode prefix followed by an optional register payload.
///
/// # Examples
/// ```
/// use loracfg_core::CommandFrame;
///
/// let frame = CommandFrame::new(&[0xC0, 0x00, 0x09]).with_payload(&[0x01, 0x02]);
/// assert_eq!(frame.as_bytes(), &[0xC0, 0x00, 0x09, 0x01, 0x02]);
/// assert_eq!(frame.opcode(), &[0xC0, 0x00, 0x09]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    bytes: Vec<u8>,
    opcode_len: usize,
}

impl CommandFrame {
    pub fn new(opcode: &[u8]) -> Self {
        Self {
            bytes: opcode.to_vec(),
            opcode_len: opcode.len(),
        }
    }

    pub fn with_payload(mut self, payload: &[u8]) -> Self {
        self.bytes.extend_from_slice(payload);
        self
    }

    pub fn opcode(&self) -> &[u8] {
        &self.bytes[..self.opcode_len]
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[self.opcode_len..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
