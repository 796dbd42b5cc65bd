//! OpenAI-compatible backend
//!
//! Covers every provider exposing a `chat/completions` endpoint: Qwen via
//! DashScope's compatible mode, DeepSeek, and Kimi via Moonshot. The system
//! prompt is a leading synthetic `system` message and assistant turns keep
//! the `assistant` role.

use super::ProviderBackend;
use async_trait::async_trait;
use conductor_application::ports::llm_gateway::{CompletionRequest, GatewayError};
use conductor_domain::Role;
use serde::Serialize;
use tracing::debug;

pub struct OpenAiCompatBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ChatCompletionBody {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: serde_json::Value,
}

impl OpenAiCompatBackend {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn build_body(request: &CompletionRequest) -> ChatCompletionBody {
        let mut messages = Vec::new();

        if let Some(prompt) = &request.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: serde_json::Value::String(prompt.clone()),
            });
        }

        for turn in &request.history {
            messages.push(ChatMessage {
                role: match turn.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: serde_json::Value::String(turn.content.clone()),
            });
        }

        // Vision-capable models take images as a data URL content part
        let content = match &request.media {
            Some(media) => serde_json::json!([
                {
                    "type": "image_url",
                    "image_url": {
                        "url": format!("data:{};base64,{}", media.mime_type, media.data)
                    }
                },
                {"type": "text", "text": request.message}
            ]),
            None => serde_json::Value::String(request.message.clone()),
        };
        messages.push(ChatMessage {
            role: "user",
            content,
        });

        ChatCompletionBody {
            model: request.model.clone(),
            messages,
        }
    }

    fn extract_text(body: &serde_json::Value) -> Option<String> {
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
    }
}

#[async_trait]
impl ProviderBackend for OpenAiCompatBackend {
    async fn complete(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::build_body(request);

        debug!(model = %request.model, history = request.history.len(), "calling chat/completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
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
            GatewayError::RequestFailed("No text in completion response".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conductor_domain::{Media, ProviderId, Turn};

    fn request() -> CompletionRequest {
        CompletionRequest::new(ProviderId::Qwen, "qwen3-max-preview", "hello")
    }

    #[test]
    fn test_system_prompt_is_leading_message() {
        let body = OpenAiCompatBackend::build_body(
            &request()
                .with_system_prompt("be brief")
                .with_history(vec![Turn::user("hi"), Turn::assistant("hello")]),
        );
        let json = serde_json::to_value(&body).unwrap();
        let messages = json["messages"].as_array().unwrap();

        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "be brief");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["role"], "user");
        assert_eq!(messages[3]["content"], "hello");
    }

    #[test]
    fn test_no_system_prompt_no_system_message() {
        let body = OpenAiCompatBackend::build_body(&request());
        let json = serde_json::to_value(&body).unwrap();
        let messages = json["messages"].as_array().unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
    }

    #[test]
    fn test_image_media_becomes_data_url_part() {
        let body = OpenAiCompatBackend::build_body(
            &CompletionRequest::new(ProviderId::Qwen, "qwen3-vl-plus-2025-12-19", "what is this")
                .with_media(Media::new("QUJD", "image/png")),
        );
        let json = serde_json::to_value(&body).unwrap();
        let content = &json["messages"][0]["content"];

        assert_eq!(content[0]["type"], "image_url");
        assert_eq!(
            content[0]["image_url"]["url"],
            "data:image/png;base64,QUJD"
        );
        assert_eq!(content[1]["text"], "what is this");
    }

    #[test]
    fn test_extract_text() {
        let payload = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Hi!"}}]
        });
        assert_eq!(OpenAiCompatBackend::extract_text(&payload).unwrap(), "Hi!");

        let empty = serde_json::json!({"choices": []});
        assert!(OpenAiCompatBackend::extract_text(&empty).is_none());
    }
}
