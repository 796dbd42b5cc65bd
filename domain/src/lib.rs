//! Domain layer for conductor
//!
//! Core business logic for tool-call orchestration: tool entities and the
//! static registry, the extraction cascade over raw model output, system
//! prompt rendering, the provider/model catalog with capability flags, and
//! failure classification with failover recommendation.
//!
//! This crate has no I/O and no dependencies on infrastructure concerns:
//! everything here is deterministic and unit-testable.

pub mod chat;
pub mod core;
pub mod failover;
pub mod prompt;
pub mod provider;
pub mod tool;

// Re-export commonly used types
pub use chat::entities::{Media, Role, Turn};
pub use core::error::DomainError;
pub use failover::{
    Alternative, ClassifiedFailure, FailureKind, classify, recommend_alternative,
};
pub use prompt::ToolPromptTemplate;
pub use provider::{
    catalog::{ModelInfo, Provider, find_model, find_provider, providers},
    id::ProviderId,
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter, ToolRecord},
    extract::extract_tool_calls,
    registry::{find_tool, tools},
};
