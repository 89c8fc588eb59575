//! Stage 3: Field and enum aggregation.
//!
//! Walk every object carried by every discovered notification and record one
//! [`Field`] per distinct object name.
//!
//! # Collision policy
//!
//! Fields are keyed by their bare descriptor, not by `(module, name)`. When
//! two traps carry same-named objects, the last declaration seen (traps in
//! discovery order, objects in OBJECTS order) wins: its entry replaces the
//! earlier one completely, enum labels included. Replacing an entry from a
//! different module emits [`TraceEvent::FieldShadowed`].

use crate::model::{BaseType, EnumTable, Field, MibNode};
use crate::source::MibSource;
use crate::tracing::{TraceEvent, TraceLevel, Tracer};
use alloc::collections::btree_map::{self, BTreeMap};
use alloc::string::String;

/// Aggregated fields keyed by bare object name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldIndex {
    fields: BTreeMap<String, Field>,
}

impl FieldIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field, returning the entry it replaced.
    pub fn record(&mut self, field: Field) -> Option<Field> {
        self.fields.insert(field.name.clone(), field)
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Number of distinct field names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Distinct field names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Label tables of fields whose last declaration is a non-empty
    /// enumeration, in ascending name order.
    pub fn enum_tables(&self) -> impl Iterator<Item = (&str, &EnumTable)> {
        self.fields
            .values()
            .filter(|f| f.is_enumerated())
            .map(|f| (f.name.as_str(), &f.values))
    }

    /// Iterate all fields in ascending name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, Field> {
        self.fields.values()
    }
}

/// Aggregate the fields carried by `traps`.
pub fn collect_fields<S: MibSource + ?Sized>(source: &S, traps: &[MibNode]) -> FieldIndex {
    collect_fields_inner(source, traps, &mut crate::tracing::NoopTracer)
}

pub(crate) fn collect_fields_inner<S: MibSource + ?Sized, TR: Tracer>(
    source: &S,
    traps: &[MibNode],
    tracer: &mut TR,
) -> FieldIndex {
    let mut index = FieldIndex::new();

    for trap in traps {
        for object in source.notification_objects(trap) {
            let field = describe_field(source, object);

            if field.values.is_empty() && field.base == BaseType::Enumeration {
                crate::trace_event!(
                    tracer,
                    TraceLevel::Debug,
                    TraceEvent::EmptyEnumeration {
                        module: &field.module,
                        name: &field.name,
                    }
                );
            }
            crate::trace_event!(
                tracer,
                TraceLevel::Debug,
                TraceEvent::FieldCollected {
                    module: &field.module,
                    name: &field.name,
                    labels: field.values.len(),
                }
            );

            let module = field.module.clone();
            if let Some(previous) = index.record(field) {
                if previous.module != module {
                    crate::trace_event!(
                        tracer,
                        TraceLevel::Warn,
                        TraceEvent::FieldShadowed {
                            name: &previous.name,
                            previous_module: &previous.module,
                            module: &module,
                        }
                    );
                }
            }
        }
    }

    index
}

/// Resolve one carried object into a field entry.
fn describe_field<S: MibSource + ?Sized>(source: &S, object: MibNode) -> Field {
    let syntax = source.object_syntax(&object);
    let values = syntax
        .enum_values()
        .map(EnumTable::from)
        .unwrap_or_default();

    Field {
        name: object.name,
        module: object.module,
        oid: object.oid,
        base: syntax.base_type(),
        values,
    }
}
