//! lang-lsp - English translations for i18n keys, right in the editor
//!
//! lang-lsp finds quoted translation keys in source text and resolves them
//! against `<namespace>_en.json` dictionaries discovered under a project root.
//! The same lookup engine backs a language server (hovers and informational
//! diagnostics), an MCP server, and a small CLI.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (scan, hover, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Lookup engine (scanner, discovery, dictionary cache, resolver)
//! - `logging`: `tracing` subscriber setup
//! - `lsp`: Language Server Protocol server
//! - `mcp`: Model Context Protocol server implementation
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod lsp;
pub mod mcp;
pub mod utils;
