use super::error::CodecError;

pub struct BlockReader<'a> {
    bytes: &'a [u8],
}

impl<'a> BlockReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn require_len(&self, expected: usize) -> Result<(), CodecError> {
        if self.bytes.len() != expected {
            return Err(CodecError::BlockLength {
                expected,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, CodecError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(CodecError::BlockLength {
                expected: offset + 1,
                actual: self.bytes.len(),
            })
    }
}
