//! trapgen-std: libsmi loader, Telegraf renderer and CLI plumbing
//!
//! This crate connects the IO-free pipeline in [`trapgen_core`] to the
//! outside world: modules are loaded through libsmi's `smidump`, the
//! resulting config model is rendered as a Telegraf `processors.enum`
//! block, and written to stdout or a directory.

pub mod cli;
pub mod logging;
pub mod output;
pub mod render;
pub mod run;
pub mod smi;
pub mod xml;

pub use trapgen_core;
