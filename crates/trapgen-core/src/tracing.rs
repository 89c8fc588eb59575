//! Pipeline tracing support.
//!
//! Provides structured trace events for following a generation run.
//! Zero overhead when the pipeline runs with [`NoopTracer`].

use crate::model::Oid;

/// Trace verbosity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// Critical errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages (stage boundaries, per-trap summaries).
    Info,
    /// Detailed debugging (individual fields).
    Debug,
    /// Verbose tracing.
    Trace,
}

/// Pipeline stage identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Module load through the MIB source.
    Load,
    /// Notification discovery.
    Discovery,
    /// Per-trap mapping.
    Mapping,
    /// Field and enum aggregation.
    Aggregation,
    /// Config model assembly.
    Assembly,
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Stage::Load => write!(f, "load"),
            Stage::Discovery => write!(f, "discovery"),
            Stage::Mapping => write!(f, "mapping"),
            Stage::Aggregation => write!(f, "aggregation"),
            Stage::Assembly => write!(f, "assembly"),
        }
    }
}

/// Structured trace events emitted during generation.
#[derive(Clone, Debug)]
pub enum TraceEvent<'a> {
    /// A stage is starting.
    StageStart { stage: Stage },
    /// A stage has ended.
    StageEnd { stage: Stage },

    /// The requested module was loaded.
    ModuleLoaded {
        /// Name as requested.
        requested: &'a str,
        /// Canonical module name.
        module: &'a str,
    },
    /// A notification definition was found.
    TrapDiscovered {
        /// Declaring module.
        module: &'a str,
        /// Notification name.
        name: &'a str,
        /// Notification OID.
        oid: &'a Oid,
    },
    /// A trap record was built.
    TrapMapped {
        /// Declaring module.
        module: &'a str,
        /// Notification name.
        name: &'a str,
        /// Carried field names, in order.
        fields: &'a [alloc::string::String],
    },
    /// A field entry was recorded by the aggregator.
    FieldCollected {
        /// Declaring module of the field.
        module: &'a str,
        /// Field name.
        name: &'a str,
        /// Number of enum labels recorded (0 for non-enumerations).
        labels: usize,
    },
    /// A field entry replaced one declared by a different module.
    FieldShadowed {
        /// Field name.
        name: &'a str,
        /// Module of the replaced entry.
        previous_module: &'a str,
        /// Module of the new entry.
        module: &'a str,
    },
    /// An enumeration field declares no values and gets no mapping.
    EmptyEnumeration {
        /// Declaring module of the field.
        module: &'a str,
        /// Field name.
        name: &'a str,
    },
}

/// Trait for receiving trace events during generation.
///
/// The tracer can filter events by returning a minimum trace level
/// from `level()`.
pub trait Tracer {
    /// Returns the most verbose trace level to emit.
    ///
    /// Default: `TraceLevel::Info`.
    fn level(&self) -> TraceLevel {
        TraceLevel::Info
    }

    /// Called for each trace event at or below the configured level.
    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>);
}

/// A no-op tracer that discards all events.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn level(&self) -> TraceLevel {
        TraceLevel::Error
    }

    fn trace(&mut self, _level: TraceLevel, _event: TraceEvent<'_>) {}
}

/// Emit a trace event if the tracer level permits.
///
/// The level is checked before the event is constructed.
#[macro_export]
macro_rules! trace_event {
    ($tracer:expr, $level:expr, $event:expr) => {
        if $level <= $tracer.level() {
            $tracer.trace($level, $event);
        }
    };
}
