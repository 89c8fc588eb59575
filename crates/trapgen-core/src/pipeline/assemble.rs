//! Stage 4: Config model assembly.

use super::aggregate::FieldIndex;
use crate::model::{Trap, TrapConfig};
use alloc::string::String;
use alloc::vec::Vec;

/// Combine the mapped traps and aggregated fields into a [`TrapConfig`].
///
/// The field list is exactly the index's key set and the enum mapping holds
/// exactly the fields whose label table is non-empty.
#[must_use]
pub fn assemble(module: &str, traps: Vec<Trap>, fields: &FieldIndex) -> TrapConfig {
    TrapConfig {
        module: module.into(),
        fields: fields.names().map(String::from).collect(),
        enums: fields
            .enum_tables()
            .map(|(name, table)| (name.into(), table.clone()))
            .collect(),
        traps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseType, EnumTable, Field};

    #[test]
    fn test_assemble_keeps_every_field_and_trap() {
        let mut index = FieldIndex::new();
        index.record(Field {
            name: "ifIndex".into(),
            module: "IF-MIB".into(),
            base: BaseType::Integer32,
            ..Field::default()
        });
        index.record(Field {
            name: "ifAdminStatus".into(),
            module: "IF-MIB".into(),
            base: BaseType::Enumeration,
            values: [(1, "up"), (2, "down")].into_iter().collect(),
            ..Field::default()
        });
        let traps = vec![
            Trap {
                name: "linkDown".into(),
                fields: vec!["ifIndex".into(), "ifAdminStatus".into()],
                ..Trap::default()
            },
            Trap {
                name: "linkUp".into(),
                fields: vec!["ifIndex".into(), "ifAdminStatus".into()],
                ..Trap::default()
            },
        ];

        let config = assemble("IF-MIB", traps, &index);

        assert_eq!(config.module, "IF-MIB");
        assert_eq!(config.fields, ["ifAdminStatus", "ifIndex"]);
        assert_eq!(config.enums.len(), 1);
        let expected: EnumTable = [(1, "up"), (2, "down")].into_iter().collect();
        assert_eq!(config.enums["ifAdminStatus"], expected);
        let names: Vec<_> = config.traps.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["linkDown", "linkUp"]);
    }

    #[test]
    fn test_assemble_empty_index() {
        let config = assemble("EMPTY-MIB", Vec::new(), &FieldIndex::new());
        assert!(config.fields.is_empty());
        assert!(config.enums.is_empty());
        assert!(config.traps.is_empty());
    }
}
