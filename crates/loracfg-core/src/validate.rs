//! Field validation against the family tables.
//!
//! Validation runs before encode on every write, so an illegal value never
//! reaches the transport. Choice fields take their human label
//! (`"9600"`, `"8N1"`, `"Fixed point"`); numeric fields take their
//! human-facing number (`"433"` MHz, `"500"` ms, `"0x1f"`); flags take
//! `true`/`false`. Checks stop at the first violation, in table order.

use crate::codec::{Access, CodecError, FieldSpec};
use crate::config::{DeviceConfig, FieldValue};
use crate::families::Family;

/// Validates operator text for one field and returns the parsed value.
///
/// # Examples
/// ```
/// use loracfg_core::{Family, FieldValue, validate};
///
/// assert_eq!(validate(Family::E22, "UARTRate", "9600")?, FieldValue::Label("9600".into()));
/// assert!(validate(Family::E22, "UARTRate", "12345").is_err());
/// # Ok::<(), loracfg_core::CodecError>(())
/// ```
pub fn validate(family: Family, field: &str, proposed: &str) -> Result<FieldValue, CodecError> {
    lookup(family, field)?.parse(proposed)
}

/// Validates a typed value for one field.
pub fn validate_value(family: Family, field: &str, value: &FieldValue) -> Result<(), CodecError> {
    lookup(family, field)?.encode(value).map(|_| ())
}

/// Validates a whole configuration: every field present, none unknown, all
/// legal.
///
/// Write-only fields are either all present or all absent; a configuration
/// without them leaves the module's stored values in place.
pub fn validate_config(cfg: &DeviceConfig) -> Result<(), CodecError> {
    let layout = cfg.family.layout();
    let writes_key = cfg.holds_write_only();
    for spec in layout.fields {
        let Some(value) = cfg.get(spec.name) else {
            if spec.access == Access::WriteOnly && !writes_key {
                continue;
            }
            return Err(CodecError::MissingField { field: spec.name });
        };
        spec.encode(value)?;
    }
    if let Some(unknown) = cfg.fields.keys().find(|name| layout.field(name).is_none()) {
        return Err(CodecError::UnknownField {
            field: unknown.clone(),
        });
    }
    Ok(())
}

fn lookup(family: Family, field: &str) -> Result<&'static FieldSpec, CodecError> {
    family
        .layout()
        .field(field)
        .ok_or_else(|| CodecError::UnknownField {
            field: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uart_rate_labels() {
        assert!(validate(Family::E22, "UARTRate", "9600").is_ok());
        assert_eq!(
            validate(Family::E22, "UARTRate", "12345").unwrap_err(),
            CodecError::InvalidFieldValue {
                field: "UARTRate",
                value: "12345".to_string()
            }
        );
    }

    #[test]
    fn labels_are_exact() {
        assert!(validate(Family::E22, "TransmissionMode", "Fixed point").is_ok());
        assert!(validate(Family::E22, "TransmissionMode", "fixed").is_err());
        assert!(validate(Family::E32, "DriveMode", "Push-pull").is_ok());
    }

    #[test]
    fn channel_range_per_family() {
        assert!(validate(Family::E22, "Channel", "410").is_ok());
        assert!(validate(Family::E22, "Channel", "493").is_ok());
        assert!(validate(Family::E22, "Channel", "494").is_err());
        assert!(validate(Family::E32, "Channel", "441").is_ok());
        assert!(validate(Family::E32, "Channel", "442").is_err());
        assert!(validate(Family::E22, "Channel", "four hundred").is_err());
    }

    #[test]
    fn address_byte_range() {
        assert_eq!(
            validate(Family::E22, "ADDH", "255").unwrap(),
            FieldValue::Number(255)
        );
        assert!(validate(Family::E22, "ADDH", "256").is_err());
        assert!(validate(Family::E22, "ADDH", "-1").is_err());
    }

    #[test]
    fn cycle_steps() {
        assert!(validate(Family::E22, "WORCycle", "1500").is_ok());
        assert!(validate(Family::E22, "WORCycle", "1250").is_err());
        assert!(validate(Family::E32, "WakeUpTime", "1250").is_ok());
        assert!(validate(Family::E32, "WakeUpTime", "2250").is_err());
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(
            validate(Family::E22, "LBT", "on").unwrap(),
            FieldValue::Flag(true)
        );
        assert_eq!(
            validate(Family::E32, "FEC", "False").unwrap(),
            FieldValue::Flag(false)
        );
        assert!(validate(Family::E32, "FEC", "maybe").is_err());
    }

    #[test]
    fn unknown_field_per_family() {
        assert!(matches!(
            validate(Family::E32, "NETID", "0"),
            Err(CodecError::UnknownField { .. })
        ));
    }

    #[test]
    fn validate_config_reports_first_violation() {
        let mut cfg = DeviceConfig::defaults(Family::E22).unwrap();
        assert!(validate_config(&cfg).is_ok());

        cfg.fields
            .insert("UARTRate".into(), FieldValue::Label("12345".into()));
        cfg.fields.insert("Channel".into(), FieldValue::Number(999));
        assert!(matches!(
            validate_config(&cfg),
            Err(CodecError::InvalidFieldValue {
                field: "UARTRate",
                ..
            })
        ));
    }

    #[test]
    fn validate_config_rejects_extra_fields() {
        let mut cfg = DeviceConfig::defaults(Family::E32).unwrap();
        cfg.fields.insert("NETID".into(), FieldValue::Number(0));
        assert_eq!(
            validate_config(&cfg).unwrap_err(),
            CodecError::UnknownField {
                field: "NETID".to_string()
            }
        );
    }

    #[test]
    fn crypt_bytes_are_all_or_nothing() {
        let mut cfg = DeviceConfig::defaults(Family::E22).unwrap();
        cfg.clear_write_only();
        assert!(validate_config(&cfg).is_ok());

        cfg.set_text("CryptH", "0xab").unwrap();
        assert_eq!(
            validate_config(&cfg).unwrap_err(),
            CodecError::MissingField { field: "CryptL" }
        );

        cfg.set_text("CryptL", "0xcd").unwrap();
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn validate_config_rejects_missing_fields() {
        let mut cfg = DeviceConfig::defaults(Family::E32).unwrap();
        cfg.fields.remove("FEC");
        assert_eq!(
            validate_config(&cfg).unwrap_err(),
            CodecError::MissingField { field: "FEC" }
        );
    }
}
