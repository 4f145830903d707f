//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Report every translated key in one or more source files
//! - `hover`: Print the translation of the key at a position
//! - `init`: Initialize lang-lsp configuration file
//! - `lsp`: Start the language server on stdin/stdout
//! - `mcp`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::config::DiscoveryBackend;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Hover(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Lsp) | Some(Command::Mcp) | None => false,
        }
    }
}

/// Common arguments shared by the lookup commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root searched for dictionaries
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Dictionary discovery backend (overrides config file)
    #[arg(long, value_enum)]
    pub discovery: Option<DiscoveryBackend>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Source files to scan
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct HoverCommand {
    /// Source file containing the key
    pub file: PathBuf,

    /// Zero-based line
    #[arg(long)]
    pub line: usize,

    /// Zero-based character offset in UTF-16 code units
    #[arg(long)]
    pub character: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report translated keys found in source files
    Scan(ScanCommand),
    /// Print the translation of the key at a position
    Hover(HoverCommand),
    /// Initialize a new .langlsprc.json configuration file
    Init,
    /// Start the language server on stdin/stdout
    Lsp,
    /// Start MCP server for AI integration
    Mcp,
}
