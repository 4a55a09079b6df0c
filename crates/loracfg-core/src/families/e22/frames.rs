use super::layout::*;
use crate::codec::{CommandFrame, RegisterBlock};
use crate::families::Persistence;
use crate::families::error::ReplyError;
use crate::families::reply::ReplyReader;

const GET_CONFIG_HEADER: [u8; HEADER_LEN] = [COMMAND_GET_REGISTER, GET_CONFIG[0], GET_CONFIG[1]];
const PRODUCT_INFO_HEADER: [u8; HEADER_LEN] = [
    COMMAND_GET_REGISTER,
    GET_PRODUCT_INFO[0],
    GET_PRODUCT_INFO[1],
];

pub fn get_config() -> CommandFrame {
    CommandFrame::new(&GET_CONFIG_HEADER)
}

/// Writes the block from register 0. A 7-byte block leaves the crypt key
/// registers untouched.
pub fn set_config(block: &RegisterBlock, persistence: Persistence) -> CommandFrame {
    let opcode = match persistence {
        Persistence::Saved => COMMAND_SET_REGISTER,
        Persistence::Temporary => COMMAND_SET_TEMPORARY_REGISTER,
    };
    CommandFrame::new(&[opcode, REGISTER_ADDH as u8, block.len() as u8])
        .with_payload(block.as_bytes())
}

pub fn get_product_info() -> CommandFrame {
    CommandFrame::new(&PRODUCT_INFO_HEADER)
}

/// Extracts the register block from a get-config reply.
///
/// The reply carries the echoed command header and the readable registers
/// only; the write-only crypt bytes are filled with zero.
pub fn parse_config_reply(reply: &[u8]) -> Result<RegisterBlock, ReplyError> {
    let reader = ReplyReader::new("get-config", reply)?;
    reader.require_len(HEADER_LEN + READABLE_LEN)?;
    reader.require_header(&GET_CONFIG_HEADER)?;

    let mut bytes = vec![0u8; BLOCK_LEN];
    bytes[..READABLE_LEN].copy_from_slice(reader.slice_from(HEADER_LEN));
    Ok(RegisterBlock::new(bytes))
}

/// Checks that a set-config reply echoes the readable registers written.
///
/// The module acknowledges with a `C1` header over the same register range;
/// the crypt key reads back as zero and is not compared.
pub fn check_write_reply(frame: &CommandFrame, reply: &[u8]) -> Result<(), ReplyError> {
    let written = frame.payload();
    let reader = ReplyReader::new("set-config", reply)?;
    reader.require_len(HEADER_LEN + written.len())?;
    reader.require_header(&[COMMAND_GET_REGISTER, REGISTER_ADDH as u8, written.len() as u8])?;

    let compared = written.len().min(READABLE_LEN);
    let received = reader.slice_from(HEADER_LEN);
    reader.require_echo(&written[..compared], &received[..compared])
}

pub fn parse_product_info(reply: &[u8]) -> Result<Vec<u8>, ReplyError> {
    let reader = ReplyReader::new("product-info", reply)?;
    reader.require_len(HEADER_LEN + PRODUCT_INFO_LEN)?;
    reader.require_header(&PRODUCT_INFO_HEADER)?;
    Ok(reader.slice_from(HEADER_LEN).to_vec())
}
