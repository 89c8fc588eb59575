//! MIB access capability.
//!
//! The pipeline never parses MIB text itself. Everything it needs to know
//! about a module comes through [`MibSource`], which an external MIB engine
//! implements (see `trapgen-std` for the libsmi-backed one, and
//! [`MemorySource`](crate::memory::MemorySource) for an in-memory store).
//!
//! ```text
//! load_module ─► module_nodes ─► notification_objects ─► object_syntax
//! ```

use crate::model::{MibNode, Syntax};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Error reported by a [`MibSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceError {
    /// No module with this name exists on the search path.
    ModuleNotFound {
        /// Requested module name.
        module: String,
    },
    /// The module exists but the engine could not load it.
    LoadFailed {
        /// Requested module name.
        module: String,
        /// Engine-provided reason.
        reason: String,
    },
}

impl SourceError {
    /// Name of the module the error refers to.
    #[must_use]
    pub fn module(&self) -> &str {
        match self {
            Self::ModuleNotFound { module } | Self::LoadFailed { module, .. } => module,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModuleNotFound { module } => write!(f, "cannot locate module {module}"),
            Self::LoadFailed { module, reason } => {
                write!(f, "cannot load module {module}: {reason}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SourceError {}

/// Read access to loaded MIB modules.
///
/// Queries after a successful [`load_module`](MibSource::load_module) are
/// infallible for definitions the engine knows about. References it cannot
/// resolve degrade to [`NodeKind::Unknown`](crate::model::NodeKind::Unknown)
/// nodes and [`BaseType::Unknown`](crate::model::BaseType::Unknown) syntax.
pub trait MibSource {
    /// Load a module by name, returning its canonical module name.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ModuleNotFound`] when the module is not on the
    /// search path and [`SourceError::LoadFailed`] for any other failure.
    fn load_module(&mut self, name: &str) -> Result<String, SourceError>;

    /// All definition nodes of a loaded module, in the engine's order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ModuleNotFound`] if the module is not loaded.
    fn module_nodes(&self, module: &str) -> Result<Vec<MibNode>, SourceError>;

    /// Objects carried by a notification, in declaration order.
    fn notification_objects(&self, notification: &MibNode) -> Vec<MibNode>;

    /// Resolved syntax of an object.
    fn object_syntax(&self, object: &MibNode) -> Syntax;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SourceError::ModuleNotFound {
            module: "NO-SUCH-MIB".into(),
        };
        assert_eq!(err.to_string(), "cannot locate module NO-SUCH-MIB");
        assert_eq!(err.module(), "NO-SUCH-MIB");

        let err = SourceError::LoadFailed {
            module: "BROKEN-MIB".into(),
            reason: "syntax error".into(),
        };
        assert_eq!(err.to_string(), "cannot load module BROKEN-MIB: syntax error");
    }
}
