//! Definition kinds and field syntax.

use alloc::string::String;
use alloc::vec::Vec;

/// Kind of a definition node as classified by the MIB engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Reference that the engine could not resolve to a definition.
    #[default]
    Unknown,
    /// OBJECT-IDENTITY, MODULE-IDENTITY, or value assignment.
    Node,
    /// OBJECT-TYPE not in a table.
    Scalar,
    /// SYNTAX is SEQUENCE OF.
    Table,
    /// Has INDEX or AUGMENTS clause.
    Row,
    /// Parent is Row (column object).
    Column,
    /// NOTIFICATION-TYPE or TRAP-TYPE.
    Notification,
    /// OBJECT-GROUP or NOTIFICATION-GROUP.
    Group,
    /// MODULE-COMPLIANCE.
    Compliance,
    /// AGENT-CAPABILITIES.
    Capabilities,
}

impl NodeKind {
    /// Check if this is a NOTIFICATION-TYPE or TRAP-TYPE.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        matches!(self, Self::Notification)
    }

}

/// SMI base type of a field.
///
/// Only [`BaseType::Enumeration`] carries labels; every other base type is
/// handled uniformly by the aggregator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// Base type could not be determined.
    #[default]
    Unknown,
    /// Signed 32-bit integer.
    Integer32,
    /// Unsigned 32-bit integer (also Counter32, Gauge32, TimeTicks).
    Unsigned32,
    /// Signed 64-bit integer.
    Integer64,
    /// Unsigned 64-bit integer (Counter64).
    Unsigned64,
    /// OCTET STRING.
    OctetString,
    /// OBJECT IDENTIFIER.
    ObjectIdentifier,
    /// INTEGER with named numbers.
    Enumeration,
    /// BITS (bit string with named bits).
    Bits,
    /// 32-bit float (SMIng).
    Float32,
    /// 64-bit float (SMIng).
    Float64,
    /// 128-bit float (SMIng).
    Float128,
    /// Pointer (SMIng).
    Pointer,
}

impl BaseType {
    /// Map an SMI base type or well-known type name to a base type.
    ///
    /// Accepts both the engine's base type spelling (`Unsigned32`,
    /// `OctetString`) and the SNMPv2-SMI / RFC1155-SMI application type names
    /// (`Counter32`, `IpAddress`, `OCTET STRING`).
    #[must_use]
    pub fn from_smi_name(name: &str) -> Self {
        match name {
            "Integer32" | "INTEGER" | "Integer" => Self::Integer32,
            "Unsigned32" | "Counter32" | "Counter" | "Gauge32" | "Gauge" | "TimeTicks" => {
                Self::Unsigned32
            }
            "Integer64" => Self::Integer64,
            "Unsigned64" | "Counter64" => Self::Unsigned64,
            "OctetString" | "OCTET STRING" | "IpAddress" | "NetworkAddress" | "Opaque" => {
                Self::OctetString
            }
            "ObjectIdentifier" | "OBJECT IDENTIFIER" => Self::ObjectIdentifier,
            "Enumeration" => Self::Enumeration,
            "Bits" | "BITS" => Self::Bits,
            "Float32" => Self::Float32,
            "Float64" => Self::Float64,
            "Float128" => Self::Float128,
            "Pointer" => Self::Pointer,
            _ => Self::Unknown,
        }
    }

}

/// Named enumeration values in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumValues {
    /// (value, label) pairs.
    pub values: Vec<(i64, String)>,
}

impl EnumValues {
    /// Create new enum values.
    #[must_use]
    pub fn new(values: Vec<(i64, String)>) -> Self {
        Self { values }
    }

    /// Check if no values are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of declared values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Get the label for a numeric value.
    #[must_use]
    pub fn get_label(&self, value: i64) -> Option<&str> {
        self.values
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, l)| l.as_str())
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for EnumValues {
    fn from_iter<I: IntoIterator<Item = (i64, S)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(v, l)| (v, l.into())).collect())
    }
}

/// Resolved syntax of an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Syntax {
    /// Enumerated INTEGER with its value set (possibly empty).
    Enumeration(EnumValues),
    /// Any other base type.
    Other(BaseType),
}

impl Syntax {
    /// Base type category of this syntax.
    #[must_use]
    pub fn base_type(&self) -> BaseType {
        match self {
            Self::Enumeration(_) => BaseType::Enumeration,
            Self::Other(base) => *base,
        }
    }

    /// The enumeration value set, if this is an enumeration.
    #[must_use]
    pub fn enum_values(&self) -> Option<&EnumValues> {
        match self {
            Self::Enumeration(values) => Some(values),
            Self::Other(_) => None,
        }
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self::Other(BaseType::Unknown)
    }
}
