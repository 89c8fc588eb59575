//! libsmi-backed MIB source.
//!
//! Modules are loaded by running `smidump -f xml -k <module>` and reading
//! its XML output into a [`MemorySource`]. The MIB search path is handed to
//! the child process as `SMIPATH`.

use crate::xml::{self, XmlError};
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use trapgen_core::memory::MemorySource;
use trapgen_core::model::{MibNode, Syntax};
use trapgen_core::source::{MibSource, SourceError};

/// Directory searched for MIBs unless disabled.
pub const DEFAULT_MIB_PATH: &str = "/usr/share/snmp/mibs";

/// Program run to dump modules.
pub const DEFAULT_SMIDUMP: &str = "smidump";

/// Stderr marker libsmi prints for an unresolvable module.
const NOT_FOUND_MARKER: &str = "cannot locate module";

/// MIB engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmiConfig {
    /// Directories searched for MIB files, in order.
    pub search_path: Vec<PathBuf>,
    /// `smidump` executable.
    pub program: PathBuf,
}

impl Default for SmiConfig {
    fn default() -> Self {
        Self {
            search_path: vec![PathBuf::from(DEFAULT_MIB_PATH)],
            program: PathBuf::from(DEFAULT_SMIDUMP),
        }
    }
}

impl SmiConfig {
    /// Configuration with the given search path and the default program.
    #[must_use]
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self {
            search_path,
            ..Self::default()
        }
    }

    /// Use a different `smidump` executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

/// A [`MibSource`] that loads modules through `smidump`.
#[derive(Debug)]
pub struct SmidumpSource {
    config: SmiConfig,
    store: MemorySource,
    attempted: BTreeSet<String>,
}

impl SmidumpSource {
    /// Create a source with nothing loaded yet.
    #[must_use]
    pub fn new(config: SmiConfig) -> Self {
        Self {
            config,
            store: MemorySource::new(),
            attempted: BTreeSet::new(),
        }
    }

    /// Modules loaded so far.
    #[must_use]
    pub fn store(&self) -> &MemorySource {
        &self.store
    }

    /// Dump and store one module, returning its canonical name.
    fn dump(&mut self, module: &str) -> Result<String, SourceError> {
        self.attempted.insert(module.to_string());

        let search_path = env::join_paths(&self.config.search_path).map_err(|e| {
            SourceError::LoadFailed {
                module: module.into(),
                reason: format!("invalid search path: {e}"),
            }
        })?;

        tracing::debug!(
            program = %self.config.program.display(),
            module,
            "running smidump"
        );
        let output = Command::new(&self.config.program)
            .args(["-f", "xml", "-k", module])
            .env("SMIPATH", &search_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SourceError::LoadFailed {
                module: module.into(),
                reason: format!("cannot run {}: {e}", self.config.program.display()),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            tracing::debug!(module, "smidump: {line}");
        }

        if !output.status.success() {
            return Err(classify_failure(module, &stderr, &output.status.to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let definition = xml::parse_module(&text).map_err(|e| match e {
            XmlError::MissingModule => SourceError::ModuleNotFound {
                module: module.into(),
            },
            XmlError::Malformed(_) => SourceError::LoadFailed {
                module: module.into(),
                reason: e.to_string(),
            },
        })?;

        let name = definition.name.clone();
        self.attempted.insert(name.clone());
        self.store.insert(definition);
        Ok(name)
    }

    /// Load the modules needed to resolve the notifications of `root`.
    ///
    /// Each module is attempted at most once. Failures are logged and the
    /// affected fields resolve to an unknown base type.
    fn load_dependencies(&mut self, root: &str) {
        loop {
            let pending: Vec<String> = self
                .store
                .missing_modules(root)
                .into_iter()
                .filter(|m| !self.attempted.contains(m))
                .collect();
            if pending.is_empty() {
                return;
            }
            for module in pending {
                match self.dump(&module) {
                    Ok(name) => tracing::debug!(module = %name, "loaded dependency"),
                    Err(e) => tracing::warn!("{e}; fields from {module} stay unresolved"),
                }
            }
        }
    }
}

/// Map a failed smidump run to a source error.
///
/// Only a "cannot locate" message naming `module` itself means the module is
/// missing; one naming an import is a load failure of `module`.
fn classify_failure(module: &str, stderr: &str, status: &str) -> SourceError {
    if stderr.contains(&format!("{NOT_FOUND_MARKER} `{module}'")) {
        return SourceError::ModuleNotFound {
            module: module.into(),
        };
    }
    let reason = match stderr.lines().map(str::trim).rev().find(|l| !l.is_empty()) {
        Some(line) => line.to_string(),
        None => format!("smidump exited with {status}"),
    };
    SourceError::LoadFailed {
        module: module.into(),
        reason,
    }
}

impl MibSource for SmidumpSource {
    fn load_module(&mut self, name: &str) -> Result<String, SourceError> {
        let module = match self.store.module(name) {
            Some(loaded) => loaded.name.clone(),
            None => self.dump(name)?,
        };
        self.load_dependencies(&module);
        Ok(module)
    }

    fn module_nodes(&self, module: &str) -> Result<Vec<MibNode>, SourceError> {
        self.store.module_nodes(module)
    }

    fn notification_objects(&self, notification: &MibNode) -> Vec<MibNode> {
        self.store.notification_objects(notification)
    }

    fn object_syntax(&self, object: &MibNode) -> Syntax {
        self.store.object_syntax(object)
    }
}
