//! Model Context Protocol server over stdio.
//!
//! Exposes an [`McpToolkit`](crate::adapters::McpToolkit) to MCP clients
//! (Claude Desktop, IDE agents) as newline-delimited JSON-RPC 2.0.

pub mod protocol;
pub mod server;

pub use server::{McpServer, SERVER_NAME};
