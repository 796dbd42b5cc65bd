//! Backend routing and pre-flight checks
//!
//! [`DispatchGateway`] is the one [`LlmGateway`] implementation. It looks
//! the requested model up in the catalog, rejects capability violations and
//! missing credentials locally, and only then hands the request to the
//! provider's backend.
//!
//! [`LlmGateway`]: conductor_application::ports::llm_gateway::LlmGateway

use super::{GeminiBackend, OpenAiCompatBackend, ProviderBackend};
use crate::config::Settings;
use async_trait::async_trait;
use conductor_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use conductor_domain::{ProviderId, find_model, find_provider};
use std::collections::HashMap;
use tracing::{debug, warn};

pub struct DispatchGateway {
    backends: HashMap<ProviderId, Box<dyn ProviderBackend>>,
    api_keys: HashMap<ProviderId, String>,
}

impl DispatchGateway {
    pub fn new(settings: &Settings) -> Self {
        let client = reqwest::Client::new();

        let mut backends: HashMap<ProviderId, Box<dyn ProviderBackend>> = HashMap::new();
        for &provider in ProviderId::all() {
            let base_url = settings.endpoint(provider).base_url.clone();
            let backend: Box<dyn ProviderBackend> = match provider {
                ProviderId::Google => Box::new(GeminiBackend::new(client.clone(), base_url)),
                ProviderId::Qwen | ProviderId::DeepSeek | ProviderId::Kimi => {
                    // Defaults always carry a base URL for these
                    Box::new(OpenAiCompatBackend::new(
                        client.clone(),
                        base_url.unwrap_or_default(),
                    ))
                }
            };
            backends.insert(provider, backend);
        }

        let api_keys = ProviderId::all()
            .iter()
            .filter_map(|&p| settings.api_key(p).map(|k| (p, k.to_string())))
            .collect();

        Self { backends, api_keys }
    }

    #[cfg(test)]
    fn with_backend(provider: ProviderId, backend: Box<dyn ProviderBackend>, api_key: Option<&str>) -> Self {
        let mut backends = HashMap::new();
        backends.insert(provider, backend);
        let mut api_keys = HashMap::new();
        if let Some(key) = api_key {
            api_keys.insert(provider, key.to_string());
        }
        Self { backends, api_keys }
    }

    /// Reject media the model cannot accept, before any network call
    fn check_capabilities(
        request: &CompletionRequest,
        model: &conductor_domain::ModelInfo,
    ) -> Result<(), GatewayError> {
        let Some(media) = &request.media else {
            return Ok(());
        };

        if media.is_video() && !model.supports_video {
            return Err(GatewayError::Unsupported {
                model: request.model.clone(),
                capability: "video".to_string(),
            });
        }
        if !media.is_video() && !model.supports_vision {
            return Err(GatewayError::Unsupported {
                model: request.model.clone(),
                capability: "image".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LlmGateway for DispatchGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let provider = find_provider(request.provider).ok_or_else(|| {
            GatewayError::UnknownModel {
                provider: request.provider.to_string(),
                model: request.model.clone(),
            }
        })?;

        let model = find_model(request.provider, &request.model).ok_or_else(|| {
            GatewayError::UnknownModel {
                provider: request.provider.to_string(),
                model: request.model.clone(),
            }
        })?;

        Self::check_capabilities(request, model)?;

        let api_key = match self.api_keys.get(&request.provider) {
            Some(key) => key.as_str(),
            None if provider.requires_api_key => {
                warn!(provider = %request.provider, "no API key configured");
                return Err(GatewayError::MissingApiKey {
                    provider: provider.display_name.clone(),
                });
            }
            None => "",
        };

        debug!(provider = %request.provider, model = %request.model, "dispatching completion");

        let backend = self
            .backends
            .get(&request.provider)
            .ok_or_else(|| GatewayError::UnknownModel {
                provider: request.provider.to_string(),
                model: request.model.clone(),
            })?;

        backend.complete(request, api_key).await
    }
}
