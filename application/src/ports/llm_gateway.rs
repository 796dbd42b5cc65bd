//! LLM Gateway port
//!
//! Defines the one contract heterogeneous LLM backends are called through.
//! Backends differ in request shape, role vocabulary, and how the system
//! prompt is injected; adapters normalize all of that behind
//! [`LlmGateway::complete`].

use async_trait::async_trait;
use conductor_domain::{Media, ProviderId, Turn};
use thiserror::Error;

/// Errors that can occur during a gateway call.
///
/// Never swallowed at this layer: every variant propagates to the failure
/// classifier, which turns its display text into a [`ClassifiedFailure`]
/// for the caller.
///
/// [`ClassifiedFailure`]: conductor_domain::ClassifiedFailure
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{provider} API key is not defined")]
    MissingApiKey { provider: String },

    #[error("Model {model} does not support {capability} input")]
    Unsupported { model: String, capability: String },

    #[error("Unknown model '{model}' for provider '{provider}'")]
    UnknownModel { provider: String, model: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// A normalized completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub provider: ProviderId,
    pub model: String,
    /// The newest user message
    pub message: String,
    /// Prior conversation turns, oldest first
    pub history: Vec<Turn>,
    /// Media attached to the newest user message
    pub media: Option<Media>,
    /// System prompt, injected per the backend's own mechanism
    pub system_prompt: Option<String>,
}

impl CompletionRequest {
    pub fn new(provider: ProviderId, model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            message: message.into(),
            history: Vec::new(),
            media: None,
            system_prompt: None,
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

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// Gateway for LLM completions
///
/// Implementations must reject capability violations (video to a non-video
/// model, image to a non-vision model) locally, before any network call.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Issue one completion and return the raw response text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
