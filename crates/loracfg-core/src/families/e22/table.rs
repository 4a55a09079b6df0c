use super::layout::*;
use crate::codec::{Access, FamilyLayout, FieldGroup, FieldKind, FieldSpec};
use crate::families::Family;

const fn byte(
    name: &'static str,
    description: &'static str,
    group: FieldGroup,
    offset: usize,
    access: Access,
) -> FieldSpec {
    FieldSpec {
        name,
        description,
        group,
        offset,
        access,
        kind: FieldKind::Byte,
    }
}

const fn field(
    name: &'static str,
    description: &'static str,
    group: FieldGroup,
    offset: usize,
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        name,
        description,
        group,
        offset,
        access: Access::ReadWrite,
        kind,
    }
}

pub static FIELDS: [FieldSpec; 18] = [
    byte("ADDH", "High byte (ADDH)", FieldGroup::Address, REGISTER_ADDH, Access::ReadWrite),
    byte("ADDL", "Low byte (ADDL)", FieldGroup::Address, REGISTER_ADDL, Access::ReadWrite),
    byte("NETID", "Network (NETID)", FieldGroup::Address, REGISTER_NETID, Access::ReadWrite),
    field(
        "UARTRate",
        "Data rate (bps)",
        FieldGroup::Uart,
        REGISTER_REG0,
        FieldKind::Choice {
            mask: MASK_UART_BAUD,
            options: &[
                (0x00, "1200"),
                (0x20, "2400"),
                (0x40, "4800"),
                (0x60, "9600"),
                (0x80, "19200"),
                (0xA0, "38400"),
                (0xC0, "57600"),
                (0xE0, "115200"),
            ],
        },
    ),
    field(
        "UARTParityBit",
        "Parity bit",
        FieldGroup::Uart,
        REGISTER_REG0,
        FieldKind::Choice {
            mask: MASK_UART_PARITY,
            options: &[(0x00, "8N1"), (0x08, "8O1"), (0x10, "8E1")],
        },
    ),
    field(
        "WirelessRate",
        "Air data rate (bps)",
        FieldGroup::Wireless,
        REGISTER_REG0,
        FieldKind::Choice {
            mask: MASK_AIR_BAUD,
            options: &[
                (0x00, "300"),
                (0x01, "1200"),
                (0x02, "2400"),
                (0x03, "4800"),
                (0x04, "9600"),
                (0x05, "19200"),
                (0x06, "38400"),
                (0x07, "62500"),
            ],
        },
    ),
    field(
        "SubPacketLength",
        "Sub packet length (bytes)",
        FieldGroup::Wireless,
        REGISTER_REG1,
        FieldKind::Choice {
            mask: MASK_SUB_PACKET,
            options: &[(0x00, "240"), (0x40, "128"), (0x80, "64"), (0xC0, "32")],
        },
    ),
    field(
        "AmbientNoise",
        "Enable ambient noise (RSSI)",
        FieldGroup::Wireless,
        REGISTER_REG1,
        FieldKind::Flag {
            mask: MASK_AMBIENT_NOISE,
        },
    ),
    field(
        "Power",
        "Transmitting power (dBm)",
        FieldGroup::Wireless,
        REGISTER_REG1,
        FieldKind::Choice {
            mask: MASK_POWER,
            options: &[(0x00, "30"), (0x01, "27"), (0x02, "24"), (0x03, "21")],
        },
    ),
    field(
        "Channel",
        "Frequency (MHz)",
        FieldGroup::Wireless,
        REGISTER_REG2,
        FieldKind::Linear {
            mask: MASK_CHANNEL,
            base: CHANNEL_BASE_MHZ,
            step: 1,
            max_index: CHANNEL_MAX_INDEX,
        },
    ),
    field(
        "RSSI",
        "Enable RSSI",
        FieldGroup::Wireless,
        REGISTER_REG3,
        FieldKind::Flag { mask: MASK_RSSI },
    ),
    field(
        "TransmissionMode",
        "Transmission mode",
        FieldGroup::Wireless,
        REGISTER_REG3,
        FieldKind::Choice {
            mask: MASK_TRANSMISSION_MODE,
            options: &[(0x00, "Transparent"), (0x40, "Fixed point")],
        },
    ),
    field(
        "Repeater",
        "Enable repeater",
        FieldGroup::Wireless,
        REGISTER_REG3,
        FieldKind::Flag {
            mask: MASK_REPEATER,
        },
    ),
    field(
        "LBT",
        "Enable monitor before transmission (LBT)",
        FieldGroup::Wireless,
        REGISTER_REG3,
        FieldKind::Flag { mask: MASK_LBT },
    ),
    field(
        "WOR",
        "Transceiver mode",
        FieldGroup::Wor,
        REGISTER_REG3,
        FieldKind::Choice {
            mask: MASK_WOR_CONTROL,
            options: &[(0x00, "Receiver"), (0x08, "Transmitter")],
        },
    ),
    field(
        "WORCycle",
        "Monitoring interval period (ms)",
        FieldGroup::Wor,
        REGISTER_REG3,
        FieldKind::Linear {
            mask: MASK_WOR_CYCLE,
            base: WOR_CYCLE_STEP_MS,
            step: WOR_CYCLE_STEP_MS,
            max_index: 7,
        },
    ),
    byte(
        "CryptH",
        "Key high byte (CRYPT_H)",
        FieldGroup::Crypto,
        REGISTER_CRYPT_H,
        Access::WriteOnly,
    ),
    byte(
        "CryptL",
        "Key low byte (CRYPT_L)",
        FieldGroup::Crypto,
        REGISTER_CRYPT_L,
        Access::WriteOnly,
    ),
];

pub static LAYOUT: FamilyLayout = FamilyLayout {
    family: Family::E22,
    block_len: BLOCK_LEN,
    readable_len: READABLE_LEN,
    head: None,
    fields: &FIELDS,
    defaults: &DEFAULTS,
};
