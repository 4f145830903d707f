use std::process::ExitCode;

use clap::Parser;
use lang_lsp::cli::{Arguments, Command, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    lang_lsp::logging::init(args.verbose());

    let server = match args.command {
        Some(Command::Lsp) => Some(lang_lsp::lsp::run_server()),
        Some(Command::Mcp) => Some(lang_lsp::mcp::run_server()),
        _ => None,
    };
    if let Some(result) = server {
        if let Err(err) = result {
            eprintln!("Error: {}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match lang_lsp::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
