//! Chat-turn orchestration.
//!
//! One user turn flows through at most two completions:
//!
//! ```text
//! execute()
//!   ├─ first completion (tools prompt attached when enabled)
//!   ├─ extract_tool_calls() over the raw response
//!   ├─ execute each call sequentially, in detection order
//!   └─ any call ran? → second completion with the results appended
//! ```
//!
//! There is no loop: tool calls found in the second completion are not
//! pursued. Provider failures surface as a classified failure; tool
//! failures degrade to error strings inside an otherwise successful turn;
//! malformed tool-call JSON is treated as "no tool call present" and the
//! literal text is returned to the user.

use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use conductor_domain::{
    ClassifiedFailure, Media, ProviderId, ToolPromptTemplate, ToolRecord, Turn, classify,
    extract_tool_calls,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One chat request from the caller
#[derive(Debug, Clone)]
pub struct ChatTurnInput {
    pub message: String,
    pub media: Option<Media>,
    pub history: Vec<Turn>,
    pub provider: ProviderId,
    pub model: String,
    pub enable_tools: bool,
}

impl ChatTurnInput {
    pub fn new(
        message: impl Into<String>,
        provider: ProviderId,
        model: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            media: None,
            history: Vec::new(),
            provider,
            model: model.into(),
            enable_tools: true,
        }
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_media(mut self, media: Media) -> Self {
        self.media = Some(media);
        self
    }

    pub fn without_tools(mut self) -> Self {
        self.enable_tools = false;
        self
    }
}

/// Successful turn: final text plus the record of every executed tool call,
/// in detection order. Serializes to the wire shape `{text, toolCalls}`.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnOutput {
    pub text: String,
    pub tool_calls: Vec<ToolRecord>,
}

/// A failed or abandoned turn
#[derive(Error, Debug)]
pub enum ChatTurnError {
    /// The caller cancelled; nothing was partially applied
    #[error("Operation cancelled")]
    Cancelled,

    /// A provider call failed; carries the classified failure for display
    #[error("{}", .0.user_message)]
    Provider(ClassifiedFailure),
}

/// The tool-call orchestration use case
pub struct ChatTurnUseCase {
    gateway: Arc<dyn LlmGateway>,
    executor: Arc<dyn ToolExecutorPort>,
}

impl ChatTurnUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self { gateway, executor }
    }

    /// Run one chat turn. Cancellation is honored at every suspension
    /// point; a cancelled turn returns [`ChatTurnError::Cancelled`] with no
    /// partial tool records.
    pub async fn execute(
        &self,
        input: ChatTurnInput,
        cancel: &CancellationToken,
    ) -> Result<ChatTurnOutput, ChatTurnError> {
        info!(
            provider = %input.provider,
            model = %input.model,
            tools = input.enable_tools,
            "chat turn started"
        );

        // The prompt advertises exactly the tools the injected executor runs
        let system_prompt = input
            .enable_tools
            .then(|| ToolPromptTemplate::render(self.executor.tools()));

        let mut request = CompletionRequest::new(input.provider, &input.model, &input.message)
            .with_history(input.history.clone());
        if let Some(media) = input.media.clone() {
            request = request.with_media(media);
        }
        if let Some(prompt) = system_prompt.clone() {
            request = request.with_system_prompt(prompt);
        }

        let first = self.complete(&request, &input, cancel).await?;

        if !input.enable_tools {
            return Ok(ChatTurnOutput {
                text: first,
                tool_calls: Vec::new(),
            });
        }

        let calls = extract_tool_calls(&first);
        if calls.is_empty() {
            // No tool call recognized: return the literal text, JSON-ish
            // fragments and all
            debug!("no tool call in first completion");
            return Ok(ChatTurnOutput {
                text: first,
                tool_calls: Vec::new(),
            });
        }

        debug!(count = calls.len(), "executing tool calls");
        let mut records = Vec::with_capacity(calls.len());
        for call in &calls {
            let record = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ChatTurnError::Cancelled),
                record = self.executor.execute(call) => record,
            };
            debug!(tool = %record.tool_name, "tool executed");
            records.push(record);
        }

        // Re-prompt with the tool results appended to the conversation
        let mut history = input.history.clone();
        history.push(Turn::user(&input.message));
        history.push(Turn::assistant(&first));

        let mut followup =
            CompletionRequest::new(input.provider, &input.model, results_message(&records))
                .with_history(history);
        if let Some(prompt) = system_prompt {
            followup = followup.with_system_prompt(prompt);
        }

        let text = self.complete(&followup, &input, cancel).await?;

        Ok(ChatTurnOutput {
            text,
            tool_calls: records,
        })
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        input: &ChatTurnInput,
        cancel: &CancellationToken,
    ) -> Result<String, ChatTurnError> {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ChatTurnError::Cancelled),
            result = self.gateway.complete(request) => result,
        };

        result.map_err(|e| {
            warn!(provider = %input.provider, model = %input.model, error = %e, "provider call failed");
            ChatTurnError::Provider(classify(
                &e.to_string(),
                input.provider,
                &input.model,
                Some(&input.message),
                input.media.as_ref(),
            ))
        })
    }
}

/// Frame the executed tool results as the follow-up user message.
fn results_message(records: &[ToolRecord]) -> String {
    let results: Vec<serde_json::Value> = records
        .iter()
        .map(|r| serde_json::json!({"tool_name": r.tool_name, "result": r.result}))
        .collect();

    format!(
        "Tool results:\n{}\n\nAnswer the user's question using these results. Reply in plain language; do not call another tool.",
        serde_json::Value::Array(results)
    )
}
