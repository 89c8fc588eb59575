//! Log setup and the bridge from pipeline trace events to `tracing`.
//!
//! Logs go to stderr; stdout carries the rendered configuration.

use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use trapgen_core::tracing::{TraceEvent, TraceLevel, Tracer};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects info (0), debug
/// (1) or trace (2+). Calling this twice is harmless.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

/// [`Tracer`] that forwards pipeline events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn level(&self) -> TraceLevel {
        to_trace_level(LevelFilter::current())
    }

    fn trace(&mut self, _level: TraceLevel, event: TraceEvent<'_>) {
        match event {
            TraceEvent::StageStart { stage } => tracing::trace!(%stage, "stage start"),
            TraceEvent::StageEnd { stage } => tracing::trace!(%stage, "stage end"),
            TraceEvent::ModuleLoaded { requested, module } => {
                if requested == module {
                    tracing::info!("Loaded module {module}");
                } else {
                    tracing::info!("Loaded module {module} (requested as {requested})");
                }
            }
            TraceEvent::TrapDiscovered { module, name, oid } => {
                tracing::debug!(%oid, "Found notification {module}::{name}");
            }
            TraceEvent::TrapMapped {
                module,
                name,
                fields,
            } => tracing::info!("Trap {module}::{name} [{}]", fields.join(" ")),
            TraceEvent::FieldCollected {
                module,
                name,
                labels,
            } => tracing::debug!(labels, "Field {module}::{name}"),
            TraceEvent::FieldShadowed {
                name,
                previous_module,
                module,
            } => tracing::warn!(
                "Field {name} from {module} replaces the one from {previous_module}"
            ),
            TraceEvent::EmptyEnumeration { module, name } => {
                tracing::debug!("Enumeration {module}::{name} has no values, no mapping emitted");
            }
        }
    }
}

fn to_trace_level(filter: LevelFilter) -> TraceLevel {
    if filter >= LevelFilter::TRACE {
        TraceLevel::Trace
    } else if filter >= LevelFilter::DEBUG {
        TraceLevel::Debug
    } else if filter >= LevelFilter::INFO {
        TraceLevel::Info
    } else if filter >= LevelFilter::WARN {
        TraceLevel::Warn
    } else {
        TraceLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(to_trace_level(LevelFilter::TRACE), TraceLevel::Trace);
        assert_eq!(to_trace_level(LevelFilter::DEBUG), TraceLevel::Debug);
        assert_eq!(to_trace_level(LevelFilter::INFO), TraceLevel::Info);
        assert_eq!(to_trace_level(LevelFilter::WARN), TraceLevel::Warn);
        assert_eq!(to_trace_level(LevelFilter::ERROR), TraceLevel::Error);
        assert_eq!(to_trace_level(LevelFilter::OFF), TraceLevel::Error);
    }

    #[test]
    fn test_init_twice() {
        init_logging(0);
        init_logging(2);
    }
}
