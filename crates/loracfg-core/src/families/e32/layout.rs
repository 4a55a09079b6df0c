pub const BLOCK_LEN: usize = 6;

pub const REGISTER_HEAD: usize = 0x00;
pub const REGISTER_ADDH: usize = 0x01;
pub const REGISTER_ADDL: usize = 0x02;
pub const REGISTER_SPED: usize = 0x03;
pub const REGISTER_CHAN: usize = 0x04;
pub const REGISTER_OPTION: usize = 0x05;

/// Head of a block saved across power cycles.
pub const COMMAND_SET_PARAMETERS: u8 = 0xC0;
/// Head of a block lost on power down.
pub const COMMAND_SET_PARAMETERS_TEMPORARY: u8 = 0xC2;
pub const COMMAND_GET_PARAMETERS: [u8; 3] = [0xC1, 0xC1, 0xC1];
pub const COMMAND_GET_MODULE_VERSION: [u8; 3] = [0xC4, 0xC4, 0xC4];

pub const MODULE_VERSION_LEN: usize = 4;
pub const MODULE_VERSION_HEAD: u8 = 0xC3;

pub const MASK_UART_PARITY: u8 = 0xC0;
pub const MASK_UART_BAUD: u8 = 0x38;
pub const MASK_AIR_BAUD: u8 = 0x07;
pub const MASK_CHANNEL: u8 = 0x1F;
pub const MASK_TRANSMISSION_MODE: u8 = 0x80;
pub const MASK_DRIVE_MODE: u8 = 0x40;
pub const MASK_WAKE_UP: u8 = 0x38;
pub const MASK_FEC: u8 = 0x04;
pub const MASK_POWER: u8 = 0x03;

pub const CHANNEL_BASE_MHZ: u32 = 410;
pub const CHANNEL_MAX_INDEX: u8 = 31;
pub const WAKE_UP_STEP_MS: u32 = 250;

/// 9600 8N1, 2400 bps air rate, 433 MHz, transparent, push-pull,
/// 250 ms wake-up, FEC on, 30 dBm.
pub const FACTORY_DEFAULTS: [u8; BLOCK_LEN] = [COMMAND_SET_PARAMETERS, 0x00, 0x00, 0x1A, 0x17, 0x44];
