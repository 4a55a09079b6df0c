pub const BLOCK_LEN: usize = 9;
/// Registers returned by a config read; the crypt key is write-only.
pub const READABLE_LEN: usize = 7;
pub const HEADER_LEN: usize = 3;

pub const REGISTER_ADDH: usize = 0x00;
pub const REGISTER_ADDL: usize = 0x01;
pub const REGISTER_NETID: usize = 0x02;
pub const REGISTER_REG0: usize = 0x03;
pub const REGISTER_REG1: usize = 0x04;
pub const REGISTER_REG2: usize = 0x05;
pub const REGISTER_REG3: usize = 0x06;
pub const REGISTER_CRYPT_H: usize = 0x07;
pub const REGISTER_CRYPT_L: usize = 0x08;

pub const COMMAND_SET_REGISTER: u8 = 0xC0;
pub const COMMAND_GET_REGISTER: u8 = 0xC1;
pub const COMMAND_SET_TEMPORARY_REGISTER: u8 = 0xC2;

/// Start address and length operands.
pub const GET_CONFIG: [u8; 2] = [REGISTER_ADDH as u8, READABLE_LEN as u8];
pub const GET_PRODUCT_INFO: [u8; 2] = [0x80, 0x07];
pub const PRODUCT_INFO_LEN: usize = 7;

pub const MASK_UART_BAUD: u8 = 0xE0;
pub const MASK_UART_PARITY: u8 = 0x18;
pub const MASK_AIR_BAUD: u8 = 0x07;
pub const MASK_SUB_PACKET: u8 = 0xC0;
pub const MASK_AMBIENT_NOISE: u8 = 0x20;
pub const MASK_POWER: u8 = 0x03;
pub const MASK_CHANNEL: u8 = 0xFF;
pub const MASK_RSSI: u8 = 0x80;
pub const MASK_TRANSMISSION_MODE: u8 = 0x40;
pub const MASK_REPEATER: u8 = 0x20;
pub const MASK_LBT: u8 = 0x10;
pub const MASK_WOR_CONTROL: u8 = 0x08;
pub const MASK_WOR_CYCLE: u8 = 0x07;

pub const CHANNEL_BASE_MHZ: u32 = 410;
pub const CHANNEL_MAX_INDEX: u8 = 83;
pub const WOR_CYCLE_STEP_MS: u32 = 500;

/// 9600 8N1, 2400 bps air rate, 240-byte sub packets, 30 dBm, 433 MHz,
/// transparent mode, WOR receiver at 500 ms.
pub const DEFAULTS: [u8; BLOCK_LEN] = [0x00, 0x00, 0x00, 0x62, 0x00, 0x17, 0x00, 0x00, 0x00];
