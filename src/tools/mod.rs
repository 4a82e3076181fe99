//! Promillemeter Tools module
//!
//! Operations behind the MCP tools.

pub mod calculator;
pub mod error;
pub mod saved_input;
pub mod scenarios;
pub mod status;

pub use error::{ToolError, ToolResult};
