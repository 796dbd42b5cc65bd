//! Application ports
//!
//! Interfaces the use cases depend on. Adapters live in the
//! infrastructure layer.

pub mod llm_gateway;
pub mod tool_executor;

pub use llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
pub use tool_executor::ToolExecutorPort;
