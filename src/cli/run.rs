//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! # Returns
//! - `Ok(ExitStatus)` describing the outcome of the lookup
//! - `Err` if the command fails (e.g., unreadable file, invalid config)

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{hover::hover, init::init, scan::scan},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Hover(cmd)) => hover(cmd),
        Some(Command::Init) => init(),
        Some(Command::Lsp) | Some(Command::Mcp) => {
            // Server commands are handled in main.rs before calling run()
            anyhow::bail!("Server commands should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
