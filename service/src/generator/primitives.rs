//! Mapping of CIM primitive types onto `LinkML` builtin types

use cim_linkml_core::error::{CimLinkMLError, Result, ValueKind};

/// Maps CIM primitive type names to `LinkML` ranges
pub struct PrimitiveMapper;

impl PrimitiveMapper {
    /// Map a CIM primitive type name to its `LinkML` range
    ///
    /// # Errors
    ///
    /// Returns [`CimLinkMLError::InvalidValue`] for a name outside the CIM
    /// primitive vocabulary.
    pub fn to_linkml(cim_type: &str) -> Result<&'static str> {
        let range = match cim_type {
            "Float" => "float",
            "Integer" | "Duration" => "integer",
            "String" => "string",
            "Boolean" => "boolean",
            "Decimal" => "double",
            // DateTime maps to `date`, not `datetime`
            "DateTime" | "MonthDay" | "Date" => "date",
            "Time" => "time",
            _ => {
                return Err(CimLinkMLError::invalid_value(
                    ValueKind::PrimitiveType,
                    cim_type,
                ));
            }
        };
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIM_PRIMITIVES: &[&str] = &[
        "Float", "Integer", "DateTime", "String", "Boolean", "Decimal", "MonthDay", "Date",
        "Time", "Duration",
    ];

    #[test]
    fn test_mapping_is_total_over_vocabulary() {
        for name in CIM_PRIMITIVES {
            assert!(PrimitiveMapper::to_linkml(name).is_ok(), "{name} unmapped");
        }
    }

    #[test]
    fn test_known_ranges() {
        assert_eq!(PrimitiveMapper::to_linkml("Float").ok(), Some("float"));
        assert_eq!(PrimitiveMapper::to_linkml("Boolean").ok(), Some("boolean"));
        assert_eq!(PrimitiveMapper::to_linkml("DateTime").ok(), Some("date"));
        assert_eq!(PrimitiveMapper::to_linkml("Time").ok(), Some("time"));
    }

    #[test]
    fn test_unknown_primitive_rejected() {
        let err = PrimitiveMapper::to_linkml("Frobnicate").unwrap_err();
        assert!(matches!(
            err,
            CimLinkMLError::InvalidValue {
                kind: ValueKind::PrimitiveType,
                ..
            }
        ));
        assert!(PrimitiveMapper::to_linkml("float").is_err());
    }
}
