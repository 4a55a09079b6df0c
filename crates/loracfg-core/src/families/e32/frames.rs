use super::layout::*;
use crate::codec::{CommandFrame, RegisterBlock};
use crate::families::error::ReplyError;
use crate::families::reply::ReplyReader;
use crate::families::{ModuleVersion, Persistence};

pub fn get_config() -> CommandFrame {
    CommandFrame::new(&COMMAND_GET_PARAMETERS)
}

/// Frames a block as a set command; the block's head selects persistence.
pub fn set_config(block: &RegisterBlock, persistence: Persistence) -> CommandFrame {
    let head = match persistence {
        Persistence::Saved => COMMAND_SET_PARAMETERS,
        Persistence::Temporary => COMMAND_SET_PARAMETERS_TEMPORARY,
    };
    let parameters = block.as_bytes().get(REGISTER_ADDH..).unwrap_or(&[]);
    CommandFrame::new(&[head]).with_payload(parameters)
}

pub fn factory_reset() -> CommandFrame {
    set_config(
        &RegisterBlock::from_slice(&FACTORY_DEFAULTS),
        Persistence::Saved,
    )
}

pub fn get_module_version() -> CommandFrame {
    CommandFrame::new(&COMMAND_GET_MODULE_VERSION)
}

/// The module answers a parameter read with the bare 6-byte block.
pub fn parse_config_reply(reply: &[u8]) -> Result<RegisterBlock, ReplyError> {
    let reader = ReplyReader::new("get-config", reply)?;
    reader.require_len(BLOCK_LEN)?;
    Ok(RegisterBlock::from_slice(reply))
}

/// Checks the echo of a set command.
///
/// The echo is accepted with its head (6 bytes) or without it (5 bytes);
/// either way the parameters must match what was sent. An echoed head must
/// be the one sent, so a temporary write never passes for a saved one.
pub fn check_write_reply(frame: &CommandFrame, reply: &[u8]) -> Result<(), ReplyError> {
    let reader = ReplyReader::new("set-config", reply)?;
    let parameters = match reader.len() {
        BLOCK_LEN => {
            reader.require_header(frame.opcode())?;
            reader.slice_from(REGISTER_ADDH)
        }
        len if len == BLOCK_LEN - 1 => reply,
        _ => {
            reader.require_len(BLOCK_LEN)?;
            reply
        }
    };
    reader.require_echo(frame.payload(), parameters)
}

pub fn parse_module_version(reply: &[u8]) -> Result<ModuleVersion, ReplyError> {
    let reader = ReplyReader::new("module-version", reply)?;
    reader.require_len(MODULE_VERSION_LEN)?;
    reader.require_header(&[MODULE_VERSION_HEAD])?;
    Ok(ModuleVersion {
        model: reply[1],
        version: reply[2],
        features: reply[3],
    })
}
