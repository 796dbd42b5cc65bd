//! Alternative provider/model recommendation.
//!
//! Priority-ordered rules over task signals:
//!
//! 1. Video attachment — only one catalog model can take video at all,
//!    so recommend it regardless of anything else.
//! 2. Image attachment — the other provider's vision-capable model.
//! 3. Message keyword scan — code-flavored tasks get a code-oriented
//!    model, translation-flavored tasks a translation-oriented one;
//!    otherwise Google and Qwen swap with each other and the remaining
//!    providers fall back to the Qwen general default.
//!
//! The keyword scan is a case-insensitive substring check over fixed
//! mixed Chinese/English lists. It is a heuristic, not intent detection.

use crate::chat::entities::Media;
use crate::provider::id::ProviderId;
use serde::{Deserialize, Serialize};

/// A concrete provider/model pair offered as a one-click retry target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub provider: String,
    pub model: String,
}

impl Alternative {
    fn new(provider: &str, model: &str) -> Self {
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
        }
    }
}

const CODE_KEYWORDS: &[&str] = &[
    "代码", "code", "函数", "function", "算法", "algorithm", "编程", "program", "bug", "调试",
    "debug", "实现", "implement", "class", "interface", "api", "脚本", "script", "python",
    "javascript", "typescript", "java", "c++", "golang", "rust", "写个", "帮我写",
];

const TRANSLATION_KEYWORDS: &[&str] = &[
    "翻译", "translate", "translation", "英译中", "中译英", "日译中", "法译中", "翻成",
    "translate to", "translate into",
];

/// Recommend an alternative for a failed request.
pub fn recommend_alternative(
    current: ProviderId,
    message: Option<&str>,
    media: Option<&Media>,
) -> Alternative {
    // 1. Video can only go to Gemini
    if media.is_some_and(Media::is_video) {
        return Alternative::new("google", "gemini-2.5-flash");
    }

    // 2. Images need a vision model on the other side
    if media.is_some_and(Media::is_image) {
        return if current == ProviderId::Google {
            Alternative::new("qwen", "qwen3-vl-plus-2025-12-19")
        } else {
            Alternative::new("google", "gemini-2.5-flash")
        };
    }

    // 3. Task-type keywords, then a cross-provider general default: Google
    //    and Qwen swap with each other, everyone else gets the Qwen default
    match current {
        ProviderId::Google => {
            if is_code_related(message) {
                Alternative::new("deepseek", "deepseek-v3.2")
            } else if is_translation_related(message) {
                Alternative::new("qwen", "qwen-mt-flash")
            } else {
                Alternative::new("qwen", "qwen-flash")
            }
        }
        ProviderId::Qwen => Alternative::new("google", "gemini-2.5-flash"),
        ProviderId::DeepSeek | ProviderId::Kimi => Alternative::new("qwen", "qwen-flash"),
    }
}

fn contains_any(message: Option<&str>, keywords: &[&str]) -> bool {
    let Some(message) = message else {
        return false;
    };
    let lowered = message.to_lowercase();
    keywords.iter().any(|k| lowered.contains(&k.to_lowercase()))
}

/// Best-effort detection of a code-flavored task
pub fn is_code_related(message: Option<&str>) -> bool {
    contains_any(message, CODE_KEYWORDS)
}

/// Best-effort detection of a translation-flavored task
pub fn is_translation_related(message: Option<&str>) -> bool {
    contains_any(message, TRANSLATION_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_beats_everything() {
        // Even a code-flavored message yields the video-capable model
        let media = Media::new("AAAA", "video/mp4");
        let alt = recommend_alternative(
            ProviderId::Google,
            Some("help me debug this python function"),
            Some(&media),
        );
        assert_eq!(alt, Alternative::new("google", "gemini-2.5-flash"));
    }

    #[test]
    fn test_image_goes_to_other_providers_vision_model() {
        let media = Media::new("AAAA", "image/png");

        let from_google = recommend_alternative(ProviderId::Google, None, Some(&media));
        assert_eq!(from_google.provider, "qwen");
        assert_eq!(from_google.model, "qwen3-vl-plus-2025-12-19");

        let from_qwen = recommend_alternative(ProviderId::Qwen, None, Some(&media));
        assert_eq!(from_qwen.provider, "google");
    }

    #[test]
    fn test_code_keywords_pick_code_model() {
        let alt = recommend_alternative(ProviderId::Google, Some("帮我写一个排序算法"), None);
        assert_eq!(alt, Alternative::new("deepseek", "deepseek-v3.2"));
    }

    #[test]
    fn test_translation_keywords_pick_translation_model() {
        let alt = recommend_alternative(ProviderId::Google, Some("把这段话翻译成英文"), None);
        assert_eq!(alt, Alternative::new("qwen", "qwen-mt-flash"));
    }

    #[test]
    fn test_plain_message_gets_general_default() {
        let alt = recommend_alternative(ProviderId::Google, Some("讲个笑话"), None);
        assert_eq!(alt, Alternative::new("qwen", "qwen-flash"));

        let alt = recommend_alternative(ProviderId::Qwen, Some("tell me a joke"), None);
        assert_eq!(alt, Alternative::new("google", "gemini-2.5-flash"));
    }

    #[test]
    fn test_deepseek_and_kimi_fall_back_to_qwen_default() {
        let alt = recommend_alternative(ProviderId::DeepSeek, Some("tell me a joke"), None);
        assert_eq!(alt, Alternative::new("qwen", "qwen-flash"));

        let alt = recommend_alternative(ProviderId::Kimi, None, None);
        assert_eq!(alt, Alternative::new("qwen", "qwen-flash"));
    }

    #[test]
    fn test_keyword_scan_is_case_insensitive() {
        assert!(is_code_related(Some("Show me some PYTHON")));
        assert!(is_translation_related(Some("please TRANSLATE this")));
        assert!(!is_code_related(None));
    }
}
