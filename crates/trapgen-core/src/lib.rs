//! trapgen-core: SNMP trap field extraction and config model assembly
//!
//! Given a loaded MIB module, discover its notifications, enumerate the
//! objects they carry, extract the labels of enumerated objects and assemble
//! a deduplicated [`TrapConfig`](model::TrapConfig) ready for rendering.
//!
//! MIB parsing is not done here: modules are read through the
//! [`MibSource`](source::MibSource) capability. The crate is `no_std`
//! compatible and IO-free.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod memory;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod tracing;

pub use pipeline::{generate, GenerateError, Outcome};
#[cfg(feature = "tracing")]
pub use pipeline::generate_traced;
