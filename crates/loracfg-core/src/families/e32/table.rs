use super::layout::*;
use crate::codec::{Access, BlockHead, FamilyLayout, FieldGroup, FieldKind, FieldSpec};
use crate::families::Family;

pub static FIELDS: [FieldSpec; 11] = [
    FieldSpec {
        name: "ADDH",
        description: "High byte (ADDH)",
        group: FieldGroup::Address,
        offset: REGISTER_ADDH,
        access: Access::ReadWrite,
        kind: FieldKind::Byte,
    },
    FieldSpec {
        name: "ADDL",
        description: "Low byte (ADDL)",
        group: FieldGroup::Address,
        offset: REGISTER_ADDL,
        access: Access::ReadWrite,
        kind: FieldKind::Byte,
    },
    // 0xC0 is a second encoding of 8N1; 0x00 is written.
    FieldSpec {
        name: "UARTParityBit",
        description: "Parity bit",
        group: FieldGroup::Uart,
        offset: REGISTER_SPED,
        access: Access::ReadWrite,
        kind: FieldKind::Choice {
            mask: MASK_UART_PARITY,
            options: &[(0x00, "8N1"), (0x40, "8O1"), (0x80, "8E1"), (0xC0, "8N1")],
        },
    },
    FieldSpec {
        name: "UARTRate",
        description: "Data rate (bps)",
        group: FieldGroup::Uart,
        offset: REGISTER_SPED,
        access: Access::ReadWrite,
        kind: FieldKind::Choice {
            mask: MASK_UART_BAUD,
            options: &[
                (0x00, "1200"),
                (0x08, "2400"),
                (0x10, "4800"),
                (0x18, "9600"),
                (0x20, "19200"),
                (0x28, "38400"),
                (0x30, "57600"),
                (0x38, "115200"),
            ],
        },
    },
    // 0x06 and 0x07 also select 19200.
    FieldSpec {
        name: "WirelessRate",
        description: "Air data rate (bps)",
        group: FieldGroup::Wireless,
        offset: REGISTER_SPED,
        access: Access::ReadWrite,
        kind: FieldKind::Choice {
            mask: MASK_AIR_BAUD,
            options: &[
                (0x00, "300"),
                (0x01, "1200"),
                (0x02, "2400"),
                (0x03, "4800"),
                (0x04, "9600"),
                (0x05, "19200"),
                (0x06, "19200"),
                (0x07, "19200"),
            ],
        },
    },
    FieldSpec {
        name: "Channel",
        description: "Frequency (MHz)",
        group: FieldGroup::Wireless,
        offset: REGISTER_CHAN,
        access: Access::ReadWrite,
        kind: FieldKind::Linear {
            mask: MASK_CHANNEL,
            base: CHANNEL_BASE_MHZ,
            step: 1,
            max_index: CHANNEL_MAX_INDEX,
        },
    },
    FieldSpec {
        name: "TransmissionMode",
        description: "Transmission mode",
        group: FieldGroup::Wireless,
        offset: REGISTER_OPTION,
        access: Access::ReadWrite,
        kind: FieldKind::Choice {
            mask: MASK_TRANSMISSION_MODE,
            options: &[(0x00, "Transparent"), (0x80, "Fixed point")],
        },
    },
    FieldSpec {
        name: "DriveMode",
        description: "IO drive mode",
        group: FieldGroup::Uart,
        offset: REGISTER_OPTION,
        access: Access::ReadWrite,
        kind: FieldKind::Choice {
            mask: MASK_DRIVE_MODE,
            options: &[(0x00, "Open collector"), (0x40, "Push-pull")],
        },
    },
    FieldSpec {
        name: "WakeUpTime",
        description: "Wireless wake-up time (ms)",
        group: FieldGroup::Wor,
        offset: REGISTER_OPTION,
        access: Access::ReadWrite,
        kind: FieldKind::Linear {
            mask: MASK_WAKE_UP,
            base: WAKE_UP_STEP_MS,
            step: WAKE_UP_STEP_MS,
            max_index: 7,
        },
    },
    FieldSpec {
        name: "FEC",
        description: "Enable forward error correction",
        group: FieldGroup::Wireless,
        offset: REGISTER_OPTION,
        access: Access::ReadWrite,
        kind: FieldKind::Flag { mask: MASK_FEC },
    },
    FieldSpec {
        name: "Power",
        description: "Transmitting power (dBm)",
        group: FieldGroup::Wireless,
        offset: REGISTER_OPTION,
        access: Access::ReadWrite,
        kind: FieldKind::Choice {
            mask: MASK_POWER,
            options: &[(0x00, "30"), (0x01, "27"), (0x02, "24"), (0x03, "21")],
        },
    },
];

pub static LAYOUT: FamilyLayout = FamilyLayout {
    family: Family::E32,
    block_len: BLOCK_LEN,
    readable_len: BLOCK_LEN,
    head: Some(BlockHead {
        offset: REGISTER_HEAD,
        accepted: &[COMMAND_SET_PARAMETERS, COMMAND_SET_PARAMETERS_TEMPORARY],
        emitted: COMMAND_SET_PARAMETERS,
    }),
    fields: &FIELDS,
    defaults: &FACTORY_DEFAULTS,
};
