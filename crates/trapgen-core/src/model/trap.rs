//! Generated configuration model.

use super::oid::Oid;
use super::types::{BaseType, EnumValues};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// One notification definition with the fields it carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trap {
    /// Notification name.
    pub name: String,
    /// Notification OID.
    pub oid: Oid,
    /// DESCRIPTION text, may be empty.
    pub description: String,
    /// Carried object names in declaration order.
    pub fields: Vec<String>,
}

/// Integer value to label mapping of an enumerated field.
///
/// Keys are kept in ascending order so that rendering is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumTable {
    labels: BTreeMap<i64, String>,
}

impl EnumTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label, replacing any previous label for the value.
    pub fn insert(&mut self, value: i64, label: impl Into<String>) -> Option<String> {
        self.labels.insert(value, label.into())
    }

    /// Get the label for a value.
    #[must_use]
    pub fn get(&self, value: i64) -> Option<&str> {
        self.labels.get(&value).map(String::as_str)
    }

    /// Number of labelled values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the table has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(value, label)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.labels.iter().map(|(v, l)| (*v, l.as_str()))
    }
}

impl From<&EnumValues> for EnumTable {
    fn from(values: &EnumValues) -> Self {
        values.values.iter().map(|(v, l)| (*v, l.clone())).collect()
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for EnumTable {
    fn from_iter<I: IntoIterator<Item = (i64, S)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (value, label) in iter {
            table.insert(value, label);
        }
        table
    }
}

/// An object carried by at least one trap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    /// Local object name (aggregation key).
    pub name: String,
    /// Declaring module.
    pub module: String,
    /// Object OID.
    pub oid: Oid,
    /// Base type category.
    pub base: BaseType,
    /// Labels, empty unless `base` is an enumeration with declared values.
    pub values: EnumTable,
}

impl Field {
    /// Check if this field contributes an enum mapping.
    #[must_use]
    pub fn is_enumerated(&self) -> bool {
        self.base == BaseType::Enumeration && !self.values.is_empty()
    }
}

/// Renderer-ready configuration for one module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrapConfig {
    /// Module name.
    pub module: String,
    /// Every distinct field name carried by any trap, sorted.
    pub fields: Vec<String>,
    /// Label tables of enumerated fields, keyed by field name.
    pub enums: BTreeMap<String, EnumTable>,
    /// Traps in discovery order.
    pub traps: Vec<Trap>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_table_orders_values() {
        let table: EnumTable = [(3, "testing"), (1, "up"), (2, "down")]
            .into_iter()
            .collect();
        let values: Vec<_> = table.iter().collect();
        assert_eq!(values, vec![(1, "up"), (2, "down"), (3, "testing")]);
    }

    #[test]
    fn test_enum_table_duplicate_value_last_wins() {
        let table: EnumTable = [(1, "on"), (1, "enabled")].into_iter().collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(1), Some("enabled"));
    }

    #[test]
    fn test_enum_table_from_values() {
        let values: EnumValues = [(-1, "unknown"), (0, "ok")].into_iter().collect();
        let table = EnumTable::from(&values);
        assert_eq!(table.get(-1), Some("unknown"));
        assert_eq!(table.get(0), Some("ok"));
    }

    #[test]
    fn test_field_is_enumerated() {
        let mut field = Field {
            name: "ifAdminStatus".into(),
            base: BaseType::Enumeration,
            ..Field::default()
        };
        assert!(!field.is_enumerated());

        field.values.insert(1, "up");
        assert!(field.is_enumerated());

        field.base = BaseType::Integer32;
        assert!(!field.is_enumerated());
    }
}
