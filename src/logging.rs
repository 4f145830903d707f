//! Diagnostic logging.
//!
//! Everything is written to stderr: stdout carries the LSP and MCP protocol
//! streams, and the CLI's own report.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive, e.g. `lang_lsp=trace`.
pub const LOG_ENV: &str = "LANG_LSP_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "lang_lsp=debug" } else { "warn" }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
