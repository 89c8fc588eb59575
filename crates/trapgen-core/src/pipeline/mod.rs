//! Config generation pipeline.
//!
//! A single linear pass with no retries:
//!
//! ```text
//! load ─► discover ─► map (per trap) ─► aggregate (across traps) ─► assemble
//! ```
//!
//! Two terminal states besides success: a load/discovery failure
//! ([`GenerateError`]) and a module without notifications
//! ([`Outcome::NoTraps`]), which is not an error.

mod aggregate;
mod assemble;
mod discovery;
mod mapper;

pub use aggregate::{collect_fields, FieldIndex};
pub use assemble::assemble;
pub use discovery::discover_traps;
pub use mapper::map_trap;

use crate::model::{Trap, TrapConfig};
use crate::source::{MibSource, SourceError};
use crate::tracing::{NoopTracer, Stage, TraceEvent, TraceLevel, Tracer};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Result of a successful pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A configuration model was produced.
    Generated(TrapConfig),
    /// The module loaded but declares no notifications.
    NoTraps {
        /// Canonical module name.
        module: String,
    },
}

/// Pipeline failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateError {
    /// The requested module could not be loaded.
    Load(SourceError),
    /// The loaded module could not be enumerated.
    Discovery(SourceError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "loading failed: {e}"),
            Self::Discovery(e) => write!(f, "finding traps failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) | Self::Discovery(e) => Some(e),
        }
    }
}

/// Run the whole pipeline for `module`.
///
/// # Errors
///
/// Returns [`GenerateError::Load`] if the source cannot load the module and
/// [`GenerateError::Discovery`] if its nodes cannot be listed afterwards.
pub fn generate<S: MibSource + ?Sized>(
    source: &mut S,
    module: &str,
) -> Result<Outcome, GenerateError> {
    generate_inner(source, module, &mut NoopTracer)
}

/// Run the whole pipeline for `module`, reporting progress to `tracer`.
///
/// # Errors
///
/// Same as [`generate`].
#[cfg(feature = "tracing")]
pub fn generate_traced<S: MibSource + ?Sized, T: Tracer>(
    source: &mut S,
    module: &str,
    tracer: &mut T,
) -> Result<Outcome, GenerateError> {
    generate_inner(source, module, tracer)
}

fn generate_inner<S: MibSource + ?Sized, TR: Tracer>(
    source: &mut S,
    requested: &str,
    tracer: &mut TR,
) -> Result<Outcome, GenerateError> {
    crate::trace_event!(tracer, TraceLevel::Debug, TraceEvent::StageStart { stage: Stage::Load });
    let module = source.load_module(requested).map_err(GenerateError::Load)?;
    crate::trace_event!(
        tracer,
        TraceLevel::Info,
        TraceEvent::ModuleLoaded {
            requested,
            module: &module,
        }
    );
    crate::trace_event!(tracer, TraceLevel::Debug, TraceEvent::StageEnd { stage: Stage::Load });

    let source: &S = source;

    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StageStart {
            stage: Stage::Discovery,
        }
    );
    let nodes = discovery::discover_traps_inner(source, &module, tracer)
        .map_err(GenerateError::Discovery)?;
    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StageEnd {
            stage: Stage::Discovery,
        }
    );

    if nodes.is_empty() {
        return Ok(Outcome::NoTraps { module });
    }

    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StageStart {
            stage: Stage::Mapping,
        }
    );
    let traps: Vec<Trap> = nodes
        .iter()
        .map(|node| mapper::map_trap_inner(source, node, tracer))
        .collect();
    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StageEnd {
            stage: Stage::Mapping,
        }
    );

    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StageStart {
            stage: Stage::Aggregation,
        }
    );
    let fields = aggregate::collect_fields_inner(source, &nodes, tracer);
    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StageEnd {
            stage: Stage::Aggregation,
        }
    );

    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StageStart {
            stage: Stage::Assembly,
        }
    );
    let config = assemble(&module, traps, &fields);
    crate::trace_event!(
        tracer,
        TraceLevel::Debug,
        TraceEvent::StageEnd {
            stage: Stage::Assembly,
        }
    );

    Ok(Outcome::Generated(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemorySource, ModuleDefinition, NodeDefinition};
    use crate::model::{BaseType, NodeKind, Syntax};

    #[test]
    fn test_generate_unknown_module() {
        let mut source = MemorySource::new();
        let err = generate(&mut source, "NO-SUCH-MIB").unwrap_err();
        assert!(matches!(err, GenerateError::Load(SourceError::ModuleNotFound { .. })));
        assert_eq!(
            err.to_string(),
            "loading failed: cannot locate module NO-SUCH-MIB"
        );
    }

    #[test]
    fn test_generate_without_notifications() {
        let mut source = MemorySource::new().with_module(
            ModuleDefinition::new("TEST-TC")
                .with_node(NodeDefinition::new("testTC", NodeKind::Node))
                .with_node(NodeDefinition::scalar("testValue", Syntax::Other(BaseType::Integer32))),
        );
        assert_eq!(
            generate(&mut source, "TEST-TC"),
            Ok(Outcome::NoTraps {
                module: "TEST-TC".into()
            })
        );
    }

    #[test]
    fn test_notification_without_objects() {
        let mut source = MemorySource::new().with_module(
            ModuleDefinition::new("TEST-MIB").with_node(NodeDefinition::notification("coldStart")),
        );
        let Ok(Outcome::Generated(config)) = generate(&mut source, "TEST-MIB") else {
            panic!("expected a generated config");
        };
        assert_eq!(config.traps.len(), 1);
        assert!(config.fields.is_empty());
        assert!(config.enums.is_empty());
    }
}
