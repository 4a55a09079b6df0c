use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{Access, CodecError, RegisterBlock};
use crate::families::Family;

/// Human-facing value of one register field.
///
/// Serialized untagged: flags as JSON booleans, bytes and affine fields as
/// numbers, enumerations as their label strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(u32),
    Label(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Flag(flag) => write!(f, "{flag}"),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Label(label) => f.write_str(label),
        }
    }
}

/// Decoded configuration of one module.
///
/// # Examples
/// ```
/// use loracfg_core::{DeviceConfig, Family, FieldValue};
///
/// let mut cfg = DeviceConfig::defaults(Family::E22)?;
/// cfg.set_text("Channel", "450")?;
/// assert_eq!(cfg.get("Channel"), Some(&FieldValue::Number(450)));
/// assert!(cfg.set_text("Channel", "494").is_err());
/// # Ok::<(), loracfg_core::CodecError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub family: Family,
    pub fields: BTreeMap<String, FieldValue>,
}

impl DeviceConfig {
    /// Empty configuration; encoding it fails until every field is set.
    pub fn new(family: Family) -> Self {
        Self {
            family,
            fields: BTreeMap::new(),
        }
    }

    /// Configuration described by the family's default register block.
    pub fn defaults(family: Family) -> Result<Self, CodecError> {
        family.decode(&RegisterBlock::from_slice(family.layout().defaults))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether any write-only field is set. A configuration read from a
    /// device holds none, since the module never returns them.
    pub fn holds_write_only(&self) -> bool {
        self.family
            .layout()
            .fields
            .iter()
            .any(|spec| spec.access == Access::WriteOnly && self.fields.contains_key(spec.name))
    }

    /// Drops every write-only field.
    pub fn clear_write_only(&mut self) {
        let layout = self.family.layout();
        self.fields.retain(|name, _| {
            layout
                .field(name)
                .is_none_or(|spec| spec.access != Access::WriteOnly)
        });
    }

    /// Sets a field after checking it against the family table.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), CodecError> {
        crate::validate::validate_value(self.family, name, &value)?;
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    /// Sets a field from operator text such as `"9600"` or `"Fixed point"`.
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<(), CodecError> {
        let value = crate::validate::validate(self.family, name, text)?;
        self.fields.insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_serialize_untagged() {
        let mut cfg = DeviceConfig::new(Family::E32);
        cfg.fields.insert("FEC".into(), FieldValue::Flag(true));
        cfg.fields.insert("Channel".into(), FieldValue::Number(433));
        cfg.fields
            .insert("UARTRate".into(), FieldValue::Label("9600".into()));
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(
            json,
            r#"{"family":"e32","fields":{"Channel":433,"FEC":true,"UARTRate":"9600"}}"#
        );
    }

    #[test]
    fn field_values_deserialize_by_shape() {
        let cfg: DeviceConfig = serde_json::from_str(
            r#"{"family":"e22","fields":{"LBT":false,"NETID":7,"Power":"27"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.family, Family::E22);
        assert_eq!(cfg.get("LBT"), Some(&FieldValue::Flag(false)));
        assert_eq!(cfg.get("NETID"), Some(&FieldValue::Number(7)));
        assert_eq!(cfg.get("Power"), Some(&FieldValue::Label("27".into())));
    }

    #[test]
    fn set_rejects_unknown_field() {
        let mut cfg = DeviceConfig::defaults(Family::E32).unwrap();
        let err = cfg.set("NETID", FieldValue::Number(1)).unwrap_err();
        assert!(matches!(err, CodecError::UnknownField { .. }));
    }

    #[test]
    fn defaults_cover_every_field() {
        for family in [Family::E22, Family::E32] {
            let cfg = DeviceConfig::defaults(family).unwrap();
            assert_eq!(cfg.fields.len(), family.layout().fields.len());
        }
    }

    #[test]
    fn clear_write_only_keeps_readable_fields() {
        let mut cfg = DeviceConfig::defaults(Family::E22).unwrap();
        assert!(cfg.holds_write_only());
        cfg.clear_write_only();
        assert!(!cfg.holds_write_only());
        assert_eq!(cfg.get("CryptH"), None);
        assert_eq!(cfg.get("Channel"), Some(&FieldValue::Number(433)));
        assert_eq!(cfg.fields.len(), 16);

        let mut e32 = DeviceConfig::defaults(Family::E32).unwrap();
        e32.clear_write_only();
        assert_eq!(e32, DeviceConfig::defaults(Family::E32).unwrap());
    }
}
