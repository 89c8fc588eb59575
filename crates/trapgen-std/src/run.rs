//! One generator run: load, generate, render, write.

use crate::logging::LogTracer;
use crate::output::{OutputError, OutputTarget};
use crate::render::{render, RenderError};
use crate::smi::{SmiConfig, SmidumpSource};
use std::fmt;
use std::path::PathBuf;
use trapgen_core::source::MibSource;
use trapgen_core::{generate_traced, GenerateError, Outcome};

/// Everything a run needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// MIB engine configuration.
    pub smi: SmiConfig,
    /// Module to generate a configuration for.
    pub module: String,
    /// Destination of the configuration.
    pub output: OutputTarget,
}

/// How a run that did not fail ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// A configuration was written.
    Written {
        /// Canonical module name.
        module: String,
        /// Written file, `None` for standard output.
        path: Option<PathBuf>,
    },
    /// The module declares no notifications; nothing was written.
    NoTraps {
        /// Canonical module name.
        module: String,
    },
}

impl RunStatus {
    /// Process exit code.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Written { .. } => 0,
            Self::NoTraps { .. } => 1,
        }
    }
}

/// Run failure.
#[derive(Debug)]
pub enum RunError {
    /// Loading or discovery failed.
    Generate(GenerateError),
    /// Rendering failed.
    Render(RenderError),
    /// Writing failed.
    Output(OutputError),
}

impl RunError {
    /// Process exit code.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        2
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate(e) => write!(f, "{e}"),
            Self::Render(e) => write!(f, "{e}"),
            Self::Output(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Generate(e) => Some(e),
            Self::Render(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

impl From<GenerateError> for RunError {
    fn from(e: GenerateError) -> Self {
        Self::Generate(e)
    }
}

impl From<RenderError> for RunError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl From<OutputError> for RunError {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

/// Generate the configuration described by `options` using `smidump`.
///
/// # Errors
///
/// See [`run_with`].
pub fn run(options: &Options) -> Result<RunStatus, RunError> {
    let mut source = SmidumpSource::new(options.smi.clone());
    run_with(&mut source, &options.module, &options.output)
}

/// Generate the configuration for `module` from `source` and write it.
///
/// Nothing is written unless a configuration was generated and rendered.
///
/// # Errors
///
/// Returns an error if the module cannot be loaded or enumerated, or if
/// rendering or writing the configuration fails.
pub fn run_with<S: MibSource + ?Sized>(
    source: &mut S,
    module: &str,
    output: &OutputTarget,
) -> Result<RunStatus, RunError> {
    let config = match generate_traced(source, module, &mut LogTracer)? {
        Outcome::Generated(config) => config,
        Outcome::NoTraps { module } => {
            tracing::warn!("No traps found in module {module}");
            return Ok(RunStatus::NoTraps { module });
        }
    };

    let text = render(&config)?;
    let path = output.write(&config.module, &text)?;
    if let Some(path) = &path {
        tracing::info!("Wrote {}", path.display());
    }

    Ok(RunStatus::Written {
        module: config.module,
        path,
    })
}
