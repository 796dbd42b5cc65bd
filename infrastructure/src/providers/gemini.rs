//! Gemini backend
//!
//! Talks to the Generative Language REST API (`generateContent`). The
//! system prompt travels in the dedicated `systemInstruction` field, not
//! in the message history; assistant turns map to role `model`.

use super::ProviderBackend;
use async_trait::async_trait;
use conductor_application::ports::llm_gateway::{CompletionRequest, GatewayError};
use conductor_domain::Role;
use serde::Serialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    #[serde(rename_all = "camelCase")]
    InlineData { mime_type: String, data: String },
}

impl GeminiBackend {
    pub fn new(client: reqwest::Client, base_url: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn build_body(request: &CompletionRequest) -> GenerateContentBody {
        let system_instruction = request.system_prompt.as_ref().map(|prompt| Content {
            role: None,
            parts: vec![Part::Text(prompt.clone())],
        });

        let mut contents: Vec<Content> = request
            .history
            .iter()
            .map(|turn| Content {
                role: Some(match turn.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                }),
                parts: vec![Part::Text(turn.content.clone())],
            })
            .collect();

        // Newest user turn: media part first, then the text
        let mut parts = Vec::new();
        if let Some(media) = &request.media {
            parts.push(Part::InlineData {
                mime_type: media.mime_type.clone(),
                data: media.data.clone(),
            });
        }
        if !request.message.is_empty() {
            parts.push(Part::Text(request.message.clone()));
        }
        contents.push(Content {
            role: Some("user"),
            parts,
        });

        GenerateContentBody {
            system_instruction,
            contents,
        }
    }

    fn extract_text(body: &serde_json::Value) -> Option<String> {
        let parts = body["candidates"][0]["content"]["parts"].as_array()?;
        let text: String = parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect::<Vec<_>>()
            .join("");
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait]
impl ProviderBackend for GeminiBackend {
    async fn complete(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<String, GatewayError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = Self::build_body(request);

        debug!(model = %request.model, history = request.history.len(), "calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown error");
            return Err(GatewayError::RequestFailed(format!(
                "{} {}",
                status.as_u16(),
                message
            )));
        }

        Self::extract_text(&payload).ok_or_else(|| {
            GatewayError::RequestFailed("No text in Gemini response".to_string())
        })
    }
}
