//! E22 register layout and command framing.
//!
//! Commands are a 3-byte header (opcode, start register, length). The module
//! answers every register command with a `C1` header echo followed by the
//! addressed registers. A config read returns the 7 readable registers; the
//! crypt key registers are write-only.

pub mod frames;
pub mod layout;
pub mod table;

pub use table::LAYOUT;

#[cfg(test)]
mod tests {
    use super::layout::*;
    use super::table::LAYOUT;
    use crate::codec::{CodecError, RegisterBlock, decode, encode};
    use crate::config::{DeviceConfig, FieldValue};
    use crate::families::Family;

    fn label(text: &str) -> FieldValue {
        FieldValue::Label(text.to_string())
    }

    fn scenario_config() -> DeviceConfig {
        let mut cfg = DeviceConfig::new(Family::E22);
        let fields = [
            ("ADDH", FieldValue::Number(0)),
            ("ADDL", FieldValue::Number(0)),
            ("NETID", FieldValue::Number(0)),
            ("UARTRate", label("9600")),
            ("UARTParityBit", label("8N1")),
            ("WirelessRate", label("2400")),
            ("SubPacketLength", label("240")),
            ("AmbientNoise", FieldValue::Flag(false)),
            ("Power", label("30")),
            ("Channel", FieldValue::Number(433)),
            ("RSSI", FieldValue::Flag(false)),
            ("TransmissionMode", label("Transparent")),
            ("Repeater", FieldValue::Flag(false)),
            ("LBT", FieldValue::Flag(false)),
            ("WOR", label("Receiver")),
            ("WORCycle", FieldValue::Number(500)),
            ("CryptH", FieldValue::Number(0)),
            ("CryptL", FieldValue::Number(0)),
        ];
        for (name, value) in fields {
            cfg.fields.insert(name.to_string(), value);
        }
        cfg
    }

    #[test]
    fn end_to_end_scenario_encodes_expected_block() {
        let block = encode(&LAYOUT, &scenario_config()).unwrap();
        assert_eq!(
            block.as_bytes(),
            &[0x00, 0x00, 0x00, 0x62, 0x00, 0x17, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn reg0_of_0x60_is_9600_8n1_at_300_air() {
        let mut cfg = scenario_config();
        cfg.fields.insert("WirelessRate".into(), label("300"));
        let block = encode(&LAYOUT, &cfg).unwrap();
        assert_eq!(block.as_bytes()[REGISTER_REG0], 0x60);
        assert_eq!(block.as_bytes()[REGISTER_REG2], 23);
        assert_eq!(block.as_bytes()[REGISTER_REG3], 0x00);
    }

    #[test]
    fn decode_reads_every_field() {
        let block = RegisterBlock::from_slice(&[0x12, 0x34, 0x56, 0xEF, 0xE3, 0x53, 0xFF, 0xAA, 0x55]);
        let cfg = decode(&LAYOUT, &block).unwrap();
        assert_eq!(cfg.get("ADDH"), Some(&FieldValue::Number(0x12)));
        assert_eq!(cfg.get("ADDL"), Some(&FieldValue::Number(0x34)));
        assert_eq!(cfg.get("NETID"), Some(&FieldValue::Number(0x56)));
        assert_eq!(cfg.get("UARTRate"), Some(&label("115200")));
        assert_eq!(cfg.get("UARTParityBit"), Some(&label("8O1")));
        assert_eq!(cfg.get("WirelessRate"), Some(&label("62500")));
        assert_eq!(cfg.get("SubPacketLength"), Some(&label("32")));
        assert_eq!(cfg.get("AmbientNoise"), Some(&FieldValue::Flag(true)));
        assert_eq!(cfg.get("Power"), Some(&label("21")));
        assert_eq!(cfg.get("Channel"), Some(&FieldValue::Number(493)));
        assert_eq!(cfg.get("RSSI"), Some(&FieldValue::Flag(true)));
        assert_eq!(cfg.get("TransmissionMode"), Some(&label("Fixed point")));
        assert_eq!(cfg.get("Repeater"), Some(&FieldValue::Flag(true)));
        assert_eq!(cfg.get("LBT"), Some(&FieldValue::Flag(true)));
        assert_eq!(cfg.get("WOR"), Some(&label("Transmitter")));
        assert_eq!(cfg.get("WORCycle"), Some(&FieldValue::Number(4000)));
        assert_eq!(cfg.get("CryptH"), Some(&FieldValue::Number(0xAA)));
        assert_eq!(cfg.get("CryptL"), Some(&FieldValue::Number(0x55)));
    }

    #[test]
    fn parity_pattern_0x18_is_invalid() {
        let mut bytes = DEFAULTS;
        bytes[REGISTER_REG0] = 0x60 | 0x18;
        let err = decode(&LAYOUT, &RegisterBlock::from_slice(&bytes)).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidFieldValue {
                field: "UARTParityBit",
                value: "0x18".to_string()
            }
        );
    }

    #[test]
    fn decode_fails_on_first_invalid_field() {
        let mut bytes = DEFAULTS;
        bytes[REGISTER_REG0] = 0x18;
        bytes[REGISTER_REG2] = 84;
        let err = decode(&LAYOUT, &RegisterBlock::from_slice(&bytes)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidFieldValue {
                field: "UARTParityBit",
                ..
            }
        ));
    }

    #[test]
    fn channel_bounds() {
        let mut bytes = DEFAULTS;
        bytes[REGISTER_REG2] = 0;
        let cfg = decode(&LAYOUT, &RegisterBlock::from_slice(&bytes)).unwrap();
        assert_eq!(cfg.get("Channel"), Some(&FieldValue::Number(410)));

        bytes[REGISTER_REG2] = 83;
        let cfg = decode(&LAYOUT, &RegisterBlock::from_slice(&bytes)).unwrap();
        assert_eq!(cfg.get("Channel"), Some(&FieldValue::Number(493)));

        bytes[REGISTER_REG2] = 84;
        let err = decode(&LAYOUT, &RegisterBlock::from_slice(&bytes)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidFieldValue {
                field: "Channel",
                ..
            }
        ));

        let mut cfg = scenario_config();
        cfg.fields.insert("Channel".into(), FieldValue::Number(494));
        assert!(encode(&LAYOUT, &cfg).is_err());
        cfg.fields.insert("Channel".into(), FieldValue::Number(409));
        assert!(encode(&LAYOUT, &cfg).is_err());
    }

    #[test]
    fn wor_cycle_bounds() {
        let mut bytes = DEFAULTS;
        bytes[REGISTER_REG3] = 0x07;
        let cfg = decode(&LAYOUT, &RegisterBlock::from_slice(&bytes)).unwrap();
        assert_eq!(cfg.get("WORCycle"), Some(&FieldValue::Number(4000)));

        let mut cfg = scenario_config();
        cfg.fields.insert("WORCycle".into(), FieldValue::Number(4500));
        let err = encode(&LAYOUT, &cfg).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidFieldValue {
                field: "WORCycle",
                value: "4500".to_string()
            }
        );
    }

    #[test]
    fn reserved_reg1_bits_are_ignored() {
        let mut bytes = DEFAULTS;
        bytes[REGISTER_REG1] = 0x1C;
        let cfg = decode(&LAYOUT, &RegisterBlock::from_slice(&bytes)).unwrap();
        assert_eq!(cfg, decode(&LAYOUT, &RegisterBlock::from_slice(&DEFAULTS)).unwrap());
        assert_eq!(LAYOUT.reserved_bits(REGISTER_REG1), 0x1C);
    }

    #[test]
    fn round_trip_over_legal_blocks() {
        for reg0 in 0..=0xFFu8 {
            if reg0 & MASK_UART_PARITY == MASK_UART_PARITY {
                continue;
            }
            for channel in [0u8, 23, 83] {
                let bytes = [0x01, 0xFE, 0x7F, reg0, 0xE3 ^ (reg0 & 0xC0), channel, reg0, 0x10, 0x20];
                let block = RegisterBlock::from_slice(&bytes);
                let cfg = decode(&LAYOUT, &block).unwrap();
                assert_eq!(encode(&LAYOUT, &cfg).unwrap(), block, "block {block}");
            }
        }
    }

    #[test]
    fn encode_requires_every_field() {
        let mut cfg = scenario_config();
        cfg.fields.remove("LBT");
        assert_eq!(
            encode(&LAYOUT, &cfg).unwrap_err(),
            CodecError::MissingField { field: "LBT" }
        );
    }

    #[test]
    fn encode_rejects_other_family() {
        let cfg = DeviceConfig::defaults(Family::E32).unwrap();
        assert!(matches!(
            encode(&LAYOUT, &cfg),
            Err(CodecError::FamilyMismatch { .. })
        ));
    }

    #[test]
    fn eight_byte_block_is_rejected() {
        let err = decode(&LAYOUT, &RegisterBlock::from_slice(&DEFAULTS[..8])).unwrap_err();
        assert_eq!(
            err,
            CodecError::BlockLength {
                expected: 9,
                actual: 8
            }
        );
    }
}
