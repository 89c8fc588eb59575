//! Generate a Telegraf enum processor config for the traps of a MIB module.
//!
//! Usage: trapgen -m <MODULE> [-p <DIR>]... [-d <DIR>]
//!
//! Exit status: 0 when a config was written, 1 when the module has no
//! notifications, 2 on any error.

use clap::Parser;
use std::process::ExitCode;
use trapgen_std::cli::Cli;
use trapgen_std::logging::init_logging;
use trapgen_std::run::run;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli.into_options()) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
