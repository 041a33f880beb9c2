//! MCP Tools module - defines tools exposed via JSON-RPC.
//!
//! Each tool module provides:
//! - Tool descriptor (name, description, input schema)
//! - Argument types
//! - Execution against the engine it wraps

pub mod income_tax;
pub mod registry;
pub mod search_catalog;
pub mod send_message;
pub mod vehicle_tax;

pub use registry::{ToolDescriptor, ToolRegistry};
