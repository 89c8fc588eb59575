//! Stage 1: Trap discovery.
//!
//! Filter a module's definition nodes down to its notifications.

use crate::model::MibNode;
use crate::source::{MibSource, SourceError};
use crate::tracing::{TraceEvent, TraceLevel, Tracer};
use alloc::vec::Vec;

/// Notification nodes of `module`, in the order the source reports them.
///
/// A module without notifications yields an empty vector, not an error.
///
/// # Errors
///
/// Propagates the source error if the module cannot be resolved.
pub fn discover_traps<S: MibSource + ?Sized>(
    source: &S,
    module: &str,
) -> Result<Vec<MibNode>, SourceError> {
    discover_traps_inner(source, module, &mut crate::tracing::NoopTracer)
}

pub(crate) fn discover_traps_inner<S: MibSource + ?Sized, TR: Tracer>(
    source: &S,
    module: &str,
    tracer: &mut TR,
) -> Result<Vec<MibNode>, SourceError> {
    let traps: Vec<MibNode> = source
        .module_nodes(module)?
        .into_iter()
        .filter(|node| node.kind.is_notification())
        .collect();

    for trap in &traps {
        crate::trace_event!(
            tracer,
            TraceLevel::Debug,
            TraceEvent::TrapDiscovered {
                module: &trap.module,
                name: &trap.name,
                oid: &trap.oid,
            }
        );
    }

    Ok(traps)
}
