//! Application layer for conductor
//!
//! Use cases and ports. The chat-turn use case orchestrates
//! completion → extraction → tool execution → re-prompt against the
//! [`LlmGateway`] and [`ToolExecutorPort`] abstractions; the concrete
//! adapters live in the infrastructure layer.
//!
//! [`LlmGateway`]: ports::llm_gateway::LlmGateway
//! [`ToolExecutorPort`]: ports::tool_executor::ToolExecutorPort

pub mod ports;
pub mod use_cases;

pub use ports::{CompletionRequest, GatewayError, LlmGateway, ToolExecutorPort};
pub use use_cases::{ChatTurnError, ChatTurnInput, ChatTurnOutput, ChatTurnUseCase};
