//! Static provider/model catalog
//!
//! Initialized once at startup and never mutated. Capability flags on
//! [`ModelInfo`] gate whether a media attachment may be sent to a model at
//! all; the gateway checks them before any network call.

use super::id::ProviderId;
use serde::Serialize;
use std::sync::LazyLock;

/// A model offered by a provider
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub display_name: String,
    pub supports_vision: bool,
    pub supports_video: bool,
}

impl ModelInfo {
    fn new(id: &str, display_name: &str, vision: bool, video: bool) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            supports_vision: vision,
            supports_video: video,
        }
    }
}

/// A provider and its model lineup
#[derive(Debug, Clone, Serialize)]
pub struct Provider {
    pub id: ProviderId,
    pub display_name: String,
    pub models: Vec<ModelInfo>,
    pub requires_api_key: bool,
}

static CATALOG: LazyLock<Vec<Provider>> = LazyLock::new(|| {
    vec![
        Provider {
            id: ProviderId::Google,
            display_name: "Google Gemini".to_string(),
            requires_api_key: true,
            models: vec![ModelInfo::new(
                "gemini-2.5-flash",
                "Gemini 2.5 Flash (multimodal)",
                true,
                true,
            )],
        },
        Provider {
            id: ProviderId::Qwen,
            display_name: "Qwen".to_string(),
            requires_api_key: true,
            models: vec![
                ModelInfo::new("qwen-plus-2025-12-01", "qwen-plus-2025-12-01", false, false),
                ModelInfo::new("qwen3-max-preview", "qwen3-max-preview", false, false),
                ModelInfo::new(
                    "qwen3-vl-plus-2025-12-19",
                    "qwen3-vl-plus-2025-12-19",
                    true,
                    false,
                ),
            ],
        },
        Provider {
            id: ProviderId::DeepSeek,
            display_name: "DeepSeek".to_string(),
            requires_api_key: true,
            models: vec![
                ModelInfo::new("deepseek-v3.2", "deepseek-v3.2", false, false),
                ModelInfo::new("deepseek-v3.1", "deepseek-v3.1", false, false),
            ],
        },
        Provider {
            id: ProviderId::Kimi,
            display_name: "Kimi".to_string(),
            requires_api_key: true,
            models: vec![ModelInfo::new(
                "kimi-k2-thinking",
                "kimi-k2-thinking",
                false,
                false,
            )],
        },
    ]
});

/// All known providers, in catalog order
pub fn providers() -> &'static [Provider] {
    &CATALOG
}

/// Look up a provider by id
pub fn find_provider(id: ProviderId) -> Option<&'static Provider> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Look up a model within a provider
pub fn find_model(provider: ProviderId, model_id: &str) -> Option<&'static ModelInfo> {
    find_provider(provider).and_then(|p| p.models.iter().find(|m| m.id == model_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_all_providers() {
        assert_eq!(providers().len(), 4);
        for id in ProviderId::all() {
            assert!(find_provider(*id).is_some());
        }
    }

    #[test]
    fn test_gemini_is_the_only_video_model() {
        let video_models: Vec<_> = providers()
            .iter()
            .flat_map(|p| p.models.iter())
            .filter(|m| m.supports_video)
            .collect();
        assert_eq!(video_models.len(), 1);
        assert_eq!(video_models[0].id, "gemini-2.5-flash");
    }

    #[test]
    fn test_qwen_vision_model() {
        let model = find_model(ProviderId::Qwen, "qwen3-vl-plus-2025-12-19").unwrap();
        assert!(model.supports_vision);
        assert!(!model.supports_video);
    }

    #[test]
    fn test_unknown_model_lookup() {
        assert!(find_model(ProviderId::Google, "not-a-model").is_none());
    }
}
