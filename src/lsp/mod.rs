//! Language server exposing translations as hovers and diagnostics.
//!
//! ## Module Structure
//!
//! - `backend`: `tower-lsp` request and notification handlers
//! - `document`: open document text and incremental edits
//! - `protocol`: resolver results to LSP diagnostics and hovers

mod backend;
mod document;
pub mod protocol;

pub use backend::Backend;

use anyhow::Result;
use tower_lsp::{LspService, Server};

/// Serve LSP over stdin/stdout until the client shuts the server down.
pub async fn start_server() -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
    Ok(())
}

/// Entry point for the language server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(start_server())
}
