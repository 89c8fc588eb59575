//! Stage 2: Trap-to-config mapping.

use crate::model::{MibNode, Trap};
use crate::source::MibSource;
use crate::tracing::{TraceEvent, TraceLevel, Tracer};

/// Build the trap record for one notification node.
///
/// Field order follows the notification's OBJECTS clause exactly; a field
/// listed twice appears twice.
pub fn map_trap<S: MibSource + ?Sized>(source: &S, notification: &MibNode) -> Trap {
    map_trap_inner(source, notification, &mut crate::tracing::NoopTracer)
}

pub(crate) fn map_trap_inner<S: MibSource + ?Sized, TR: Tracer>(
    source: &S,
    notification: &MibNode,
    tracer: &mut TR,
) -> Trap {
    let trap = Trap {
        name: notification.name.clone(),
        oid: notification.oid.clone(),
        description: notification.description.clone(),
        fields: source
            .notification_objects(notification)
            .into_iter()
            .map(|object| object.name)
            .collect(),
    };

    crate::trace_event!(
        tracer,
        TraceLevel::Info,
        TraceEvent::TrapMapped {
            module: &notification.module,
            name: &trap.name,
            fields: &trap.fields,
        }
    );

    trap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemorySource, ModuleDefinition, NodeDefinition};
    use crate::model::{NodeKind, Oid};

    fn source() -> MemorySource {
        MemorySource::new().with_module(
            ModuleDefinition::new("TEST-MIB").with_node(
                NodeDefinition::notification("testEvent")
                    .with_oid(Oid::from_dotted("1.3.6.1.4.1.99999.0.1").unwrap())
                    .with_description("Something happened.")
                    .with_object("TEST-MIB", "testSeverity")
                    .with_object("TEST-MIB", "testIndex")
                    .with_object("TEST-MIB", "testSeverity"),
            ),
        )
    }

    #[test]
    fn test_map_trap_preserves_field_order_and_duplicates() {
        let source = source();
        let node = source.module_nodes("TEST-MIB").unwrap().remove(0);
        let trap = map_trap(&source, &node);

        assert_eq!(trap.name, "testEvent");
        assert_eq!(trap.description, "Something happened.");
        assert_eq!(trap.oid.to_string(), "1.3.6.1.4.1.99999.0.1");
        assert_eq!(trap.fields, ["testSeverity", "testIndex", "testSeverity"]);
    }

    #[test]
    fn test_map_trap_without_objects() {
        let source = source();
        let node = MibNode::new("TEST-MIB", "unknownEvent", NodeKind::Notification);
        let trap = map_trap(&source, &node);
        assert!(trap.fields.is_empty());
        assert!(trap.description.is_empty());
    }
}
