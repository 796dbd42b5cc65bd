//! Provider adapters
//!
//! Two backend strategies sit behind the [`LlmGateway`] port:
//!
//! - [`GeminiBackend`] — system prompt via a dedicated `systemInstruction`
//!   field, history roles `user`/`model`, media as an `inlineData` part.
//! - [`OpenAiCompatBackend`] — system prompt as a leading `system` message,
//!   history roles `user`/`assistant`; covers Qwen (DashScope), DeepSeek,
//!   and Kimi (Moonshot) through their OpenAI-compatible endpoints.
//!
//! [`DispatchGateway`] routes requests to the right backend and enforces
//! the catalog-driven capability gate before any network I/O.
//!
//! [`LlmGateway`]: conductor_application::ports::llm_gateway::LlmGateway

pub mod dispatch;
pub mod gemini;
pub mod openai_compat;

use async_trait::async_trait;
use conductor_application::ports::llm_gateway::{CompletionRequest, GatewayError};

pub use dispatch::DispatchGateway;
pub use gemini::GeminiBackend;
pub use openai_compat::OpenAiCompatBackend;

/// One concrete backend strategy.
///
/// Credential and capability checks have already happened by the time
/// `complete` is called; the backend only builds its wire request, sends
/// it, and extracts the text.
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<String, GatewayError>;
}
