//! Settings schema
//!
//! API keys and endpoints for the provider backends and the search tool.
//! Read-only after load; there is no runtime mutation.

use conductor_domain::ProviderId;
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub providers: ProviderSettings,
    pub search: SearchSettings,
}

/// Per-provider credentials and endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub google: EndpointSettings,
    pub qwen: EndpointSettings,
    pub deepseek: EndpointSettings,
    pub kimi: EndpointSettings,
}

/// Credential and base URL for one backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Search tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub tavily_api_key: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            google: EndpointSettings {
                api_key: None,
                base_url: Some("https://generativelanguage.googleapis.com/v1beta".to_string()),
            },
            qwen: EndpointSettings {
                api_key: None,
                base_url: Some(
                    "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string(),
                ),
            },
            deepseek: EndpointSettings {
                api_key: None,
                base_url: Some("https://api.deepseek.com/v1".to_string()),
            },
            kimi: EndpointSettings {
                api_key: None,
                base_url: Some("https://api.moonshot.cn/v1".to_string()),
            },
        }
    }
}

impl Settings {
    /// Endpoint settings for a provider
    pub fn endpoint(&self, provider: ProviderId) -> &EndpointSettings {
        match provider {
            ProviderId::Google => &self.providers.google,
            ProviderId::Qwen => &self.providers.qwen,
            ProviderId::DeepSeek => &self.providers.deepseek,
            ProviderId::Kimi => &self.providers.kimi,
        }
    }

    /// Configured API key for a provider, if any
    pub fn api_key(&self, provider: ProviderId) -> Option<&str> {
        self.endpoint(provider).api_key.as_deref()
    }
}
