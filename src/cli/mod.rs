//! Command-line interface layer.
//!
//! Commands share the lookup engine in [`crate::core`]; this layer only
//! resolves arguments, drives a runtime, and formats output.

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

use anyhow::Result;

pub use args::{Arguments, Command, CommonArgs, HoverCommand, OutputFormat, ScanCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
