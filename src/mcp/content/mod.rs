//! Content types module for MCP tool responses.

pub mod types;

pub use types::{ContentItem, ToolResult};
