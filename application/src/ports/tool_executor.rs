//! Tool Executor port

use async_trait::async_trait;
use conductor_domain::{ToolCall, ToolDefinition, ToolRecord};

/// Port for tool execution
///
/// `execute` is deliberately infallible: every failure — unknown tool,
/// missing argument, network error inside a tool — is embedded in the
/// returned record's result string, so one failing tool never aborts the
/// turn it belongs to.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// The tools this executor can run
    fn tools(&self) -> &'static [ToolDefinition] {
        conductor_domain::tools()
    }

    /// Execute one tool call and return its record
    async fn execute(&self, call: &ToolCall) -> ToolRecord;
}
