//! Data model shared by the MIB access layer and the pipeline.
//!
//! Two halves live here:
//!
//! - What a [`MibSource`](crate::source::MibSource) reports about a loaded
//!   module: [`MibNode`], [`NodeKind`], [`Syntax`], [`EnumValues`], [`Oid`].
//! - What the pipeline produces: [`Trap`], [`Field`], [`EnumTable`] and the
//!   assembled [`TrapConfig`].

mod node;
mod oid;
mod trap;
mod types;

pub use node::MibNode;
pub use oid::{Oid, OidParseError};
pub use trap::{EnumTable, Field, Trap, TrapConfig};
pub use types::{BaseType, EnumValues, NodeKind, Syntax};
