use super::error::ReplyError;

/// Reply sent by either family when it cannot parse a command.
pub const RESPONSE_WRONG_FORMAT: [u8; 3] = [0xFF, 0xFF, 0xFF];

pub struct ReplyReader<'a> {
    command: &'static str,
    reply: &'a [u8],
}

impl<'a> ReplyReader<'a> {
    /// Wraps a reply, failing early if the module reported a wrong format.
    pub fn new(command: &'static str, reply: &'a [u8]) -> Result<Self, ReplyError> {
        if reply == RESPONSE_WRONG_FORMAT {
            return Err(ReplyError::Rejected { command });
        }
        Ok(Self { command, reply })
    }

    pub fn len(&self) -> usize {
        self.reply.len()
    }

    pub fn require_len(&self, expected: usize) -> Result<(), ReplyError> {
        if self.reply.len() != expected {
            return Err(ReplyError::UnexpectedLength {
                command: self.command,
                expected,
                actual: self.reply.len(),
            });
        }
        Ok(())
    }

    pub fn require_header(&self, expected: &[u8]) -> Result<(), ReplyError> {
        let actual = self.reply.get(..expected.len()).unwrap_or(self.reply);
        if actual != expected {
            return Err(ReplyError::UnexpectedHeader {
                command: self.command,
                expected: base16::encode_lower(expected),
                actual: base16::encode_lower(actual),
            });
        }
        Ok(())
    }

    pub fn require_echo(&self, sent: &[u8], received: &[u8]) -> Result<(), ReplyError> {
        if sent != received {
            return Err(ReplyError::EchoMismatch {
                command: self.command,
                sent: base16::encode_lower(sent),
                received: base16::encode_lower(received),
            });
        }
        Ok(())
    }

    pub fn slice_from(&self, offset: usize) -> &'a [u8] {
        self.reply.get(offset..).unwrap_or(&[])
    }
}
