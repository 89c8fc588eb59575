//! Command-line options of the `trapgen` binary.

use crate::output::OutputTarget;
use crate::run::Options;
use crate::smi::{SmiConfig, DEFAULT_MIB_PATH, DEFAULT_SMIDUMP};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Generate a Telegraf enum processor config for the SNMP traps of a MIB
/// module.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "trapgen", version, about, long_about = None)]
pub struct Cli {
    /// Additional MIB directory, searched after the default one (repeatable)
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Do not search the default MIB directory
    #[arg(long)]
    pub no_default_path: bool,

    /// MIB module to generate a config for
    #[arg(short, long, value_name = "NAME")]
    pub module: String,

    /// Write <DIR>/<MODULE>.conf instead of printing to stdout
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// smidump executable
    #[arg(long, env = "TRAPGEN_SMIDUMP", value_name = "PATH", default_value = DEFAULT_SMIDUMP)]
    pub smidump: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// MIB search path: the default directory, then `--path` entries.
    #[must_use]
    pub fn search_path(&self) -> Vec<PathBuf> {
        let default = (!self.no_default_path).then(|| PathBuf::from(DEFAULT_MIB_PATH));
        default.into_iter().chain(self.paths.iter().cloned()).collect()
    }

    /// Convert into run options.
    #[must_use]
    pub fn into_options(self) -> Options {
        let smi = SmiConfig::new(self.search_path()).with_program(self.smidump);
        let output = self
            .directory
            .map_or(OutputTarget::Stdout, OutputTarget::Directory);
        Options {
            smi,
            module: self.module,
            output,
        }
    }
}
