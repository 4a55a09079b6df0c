//! E32 register layout and command framing.
//!
//! The register block is 6 bytes led by a head byte that doubles as the set
//! opcode (`C0` saved, `C2` temporary). Reads use repeated opcodes
//! (`C1 C1 C1`, `C4 C4 C4`) and are answered without a header echo.

pub mod frames;
pub mod layout;
pub mod table;

pub use table::LAYOUT;

#[cfg(test)]
mod tests {
    use super::layout::*;
    use super::table::LAYOUT;
    use crate::codec::{CodecError, RegisterBlock, decode, encode};
    use crate::config::FieldValue;

    fn label(text: &str) -> FieldValue {
        FieldValue::Label(text.to_string())
    }

    fn decode_bytes(bytes: &[u8]) -> Result<crate::config::DeviceConfig, CodecError> {
        decode(&LAYOUT, &RegisterBlock::from_slice(bytes))
    }

    #[test]
    fn factory_defaults_decode() {
        let cfg = decode_bytes(&FACTORY_DEFAULTS).unwrap();
        assert_eq!(cfg.get("ADDH"), Some(&FieldValue::Number(0)));
        assert_eq!(cfg.get("ADDL"), Some(&FieldValue::Number(0)));
        assert_eq!(cfg.get("UARTParityBit"), Some(&label("8N1")));
        assert_eq!(cfg.get("UARTRate"), Some(&label("9600")));
        assert_eq!(cfg.get("WirelessRate"), Some(&label("2400")));
        assert_eq!(cfg.get("Channel"), Some(&FieldValue::Number(433)));
        assert_eq!(cfg.get("TransmissionMode"), Some(&label("Transparent")));
        assert_eq!(cfg.get("DriveMode"), Some(&label("Push-pull")));
        assert_eq!(cfg.get("WakeUpTime"), Some(&FieldValue::Number(250)));
        assert_eq!(cfg.get("FEC"), Some(&FieldValue::Flag(true)));
        assert_eq!(cfg.get("Power"), Some(&label("30")));
    }

    #[test]
    fn factory_defaults_round_trip() {
        let block = RegisterBlock::from_slice(&FACTORY_DEFAULTS);
        let cfg = decode(&LAYOUT, &block).unwrap();
        assert_eq!(encode(&LAYOUT, &cfg).unwrap(), block);
    }

    #[test]
    fn duplicate_parity_pattern_decodes_and_encodes_canonically() {
        let mut bytes = FACTORY_DEFAULTS;
        bytes[REGISTER_SPED] = 0xC0 | 0x18 | 0x02;
        let cfg = decode_bytes(&bytes).unwrap();
        assert_eq!(cfg.get("UARTParityBit"), Some(&label("8N1")));

        let encoded = encode(&LAYOUT, &cfg).unwrap();
        assert_eq!(encoded.as_bytes()[REGISTER_SPED], 0x1A);
        assert_ne!(encoded.as_bytes(), &bytes);
    }

    #[test]
    fn duplicate_air_rate_patterns_encode_as_0x05() {
        for pattern in [0x05, 0x06, 0x07] {
            let mut bytes = FACTORY_DEFAULTS;
            bytes[REGISTER_SPED] = 0x18 | pattern;
            let cfg = decode_bytes(&bytes).unwrap();
            assert_eq!(cfg.get("WirelessRate"), Some(&label("19200")));
            let encoded = encode(&LAYOUT, &cfg).unwrap();
            assert_eq!(encoded.as_bytes()[REGISTER_SPED], 0x18 | 0x05);
        }
    }

    #[test]
    fn wake_up_time_bounds() {
        let mut bytes = FACTORY_DEFAULTS;
        bytes[REGISTER_OPTION] = 0x00;
        assert_eq!(
            decode_bytes(&bytes).unwrap().get("WakeUpTime"),
            Some(&FieldValue::Number(250))
        );
        bytes[REGISTER_OPTION] = 0x38;
        assert_eq!(
            decode_bytes(&bytes).unwrap().get("WakeUpTime"),
            Some(&FieldValue::Number(2000))
        );

        let mut cfg = decode_bytes(&FACTORY_DEFAULTS).unwrap();
        cfg.fields.insert("WakeUpTime".into(), FieldValue::Number(2250));
        assert!(encode(&LAYOUT, &cfg).is_err());
    }

    #[test]
    fn channel_bounds() {
        let mut bytes = FACTORY_DEFAULTS;
        bytes[REGISTER_CHAN] = 0x1F;
        assert_eq!(
            decode_bytes(&bytes).unwrap().get("Channel"),
            Some(&FieldValue::Number(441))
        );

        let mut cfg = decode_bytes(&FACTORY_DEFAULTS).unwrap();
        cfg.fields.insert("Channel".into(), FieldValue::Number(442));
        assert_eq!(
            encode(&LAYOUT, &cfg).unwrap_err(),
            CodecError::InvalidFieldValue {
                field: "Channel",
                value: "442".to_string()
            }
        );
    }

    #[test]
    fn reserved_channel_bits_are_ignored() {
        let mut bytes = FACTORY_DEFAULTS;
        bytes[REGISTER_CHAN] = 0xE0 | 0x17;
        assert_eq!(
            decode_bytes(&bytes).unwrap().get("Channel"),
            Some(&FieldValue::Number(433))
        );
        assert_eq!(LAYOUT.reserved_bits(REGISTER_CHAN), 0xE0);
    }

    #[test]
    fn temporary_head_is_accepted_but_not_emitted() {
        let mut bytes = FACTORY_DEFAULTS;
        bytes[REGISTER_HEAD] = COMMAND_SET_PARAMETERS_TEMPORARY;
        let cfg = decode_bytes(&bytes).unwrap();
        let encoded = encode(&LAYOUT, &cfg).unwrap();
        assert_eq!(encoded.as_bytes()[REGISTER_HEAD], COMMAND_SET_PARAMETERS);
    }

    #[test]
    fn unknown_head_is_invalid() {
        let mut bytes = FACTORY_DEFAULTS;
        bytes[REGISTER_HEAD] = 0xC1;
        assert_eq!(
            decode_bytes(&bytes).unwrap_err(),
            CodecError::InvalidFieldValue {
                field: "HEAD",
                value: "0xc1".to_string()
            }
        );
    }

    #[test]
    fn round_trip_over_canonical_blocks() {
        for sped in 0..=0xFFu8 {
            if sped & MASK_UART_PARITY == 0xC0 || sped & MASK_AIR_BAUD > 0x05 {
                continue;
            }
            for option in [0x00u8, 0x44, 0xFF, 0xBB] {
                let bytes = [COMMAND_SET_PARAMETERS, 0xA5, 0x5A, sped, sped & MASK_CHANNEL, option];
                let block = RegisterBlock::from_slice(&bytes);
                let cfg = decode(&LAYOUT, &block).unwrap();
                assert_eq!(encode(&LAYOUT, &cfg).unwrap(), block, "block {block}");
            }
        }
    }
}
