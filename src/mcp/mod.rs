//! Model Context Protocol (MCP) server implementation.
//!
//! This module exposes the translation lookups to AI assistants as MCP tools,
//! so an agent can ask what a key in the code means without opening the
//! dictionaries itself.
//!
//! ## Module Structure
//!
//! - `server`: Main MCP server implementation
//! - `types`: MCP-specific parameter and result types

mod server;
pub mod types;

pub use server::{LangLspMcpServer, run_server};
