//! MCP tool session for askmongo.
//!
//! Launches the MongoDB MCP server as a child process and speaks the
//! Model Context Protocol to it over stdio, using the official rmcp SDK.

pub mod mcp;

pub use mcp::McpSession;
