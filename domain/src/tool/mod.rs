//! Tool domain: definitions, invocation extraction, and execution records

pub mod entities;
pub mod extract;
pub mod registry;

pub use entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter, ToolRecord};
pub use extract::extract_tool_calls;
pub use registry::tools;
