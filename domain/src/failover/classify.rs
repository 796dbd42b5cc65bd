//! Failure classification.
//!
//! Ordered pattern matching over the raw failure text against a fixed rule
//! set; the first matching rule wins. Each kind carries a fixed HTTP-style
//! status code and a suggestion the caller can show verbatim.

use super::recommend::{Alternative, recommend_alternative};
use crate::chat::entities::Media;
use crate::provider::catalog;
use crate::provider::id::ProviderId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Failure taxonomy for provider-call errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    ApiKeyMissing,
    QuotaExceeded,
    RateLimit,
    NetworkError,
    ModelCapability,
    Unknown,
}

impl FailureKind {
    /// Taxonomy tag used on the wire
    pub fn tag(&self) -> &'static str {
        match self {
            FailureKind::ApiKeyMissing => "API_KEY_MISSING",
            FailureKind::QuotaExceeded => "QUOTA_EXCEEDED",
            FailureKind::RateLimit => "RATE_LIMIT",
            FailureKind::NetworkError => "NETWORK_ERROR",
            FailureKind::ModelCapability => "MODEL_CAPABILITY",
            FailureKind::Unknown => "UNKNOWN",
        }
    }

    /// Fixed HTTP-style status code for this kind
    pub fn status(&self) -> u16 {
        match self {
            FailureKind::ApiKeyMissing => 401,
            FailureKind::QuotaExceeded => 429,
            FailureKind::RateLimit => 429,
            FailureKind::NetworkError => 503,
            FailureKind::ModelCapability => 400,
            FailureKind::Unknown => 500,
        }
    }

    /// Whether an alternative provider/model should be recommended
    fn wants_alternative(&self) -> bool {
        matches!(
            self,
            FailureKind::ApiKeyMissing
                | FailureKind::QuotaExceeded
                | FailureKind::RateLimit
                | FailureKind::ModelCapability
        )
    }
}

/// A classified provider-call failure, ready for caller display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedFailure {
    pub kind: FailureKind,
    /// Raw error text as received from the backend
    pub raw: String,
    /// Plain-language description for the user
    pub user_message: String,
    /// Actionable suggestion
    pub suggestion: String,
    /// Recommended retry target, where determinable
    pub alternative: Option<Alternative>,
    /// HTTP-style status code
    pub status: u16,
}

impl ClassifiedFailure {
    /// The wire-format failure response: `{error, errorType, userMessage,
    /// suggestion, alternativeProvider?, alternativeModel?}`.
    pub fn to_response_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.raw,
            "errorType": self.kind.tag(),
            "userMessage": self.user_message,
            "suggestion": self.suggestion,
        });
        if let Some(alt) = &self.alternative {
            obj["alternativeProvider"] = serde_json::Value::String(alt.provider.clone());
            obj["alternativeModel"] = serde_json::Value::String(alt.model.clone());
        }
        obj
    }
}

static API_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)api[_ ]?key.*not (defined|configured)|unauthorized|\b401\b|invalid.*key")
        .expect("static pattern")
});
static QUOTA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)quota|exceeded|\b429\b|too many requests").expect("static pattern")
});
static RATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rate limit|throttl").expect("static pattern"));
static NETWORK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)fetch failed|network|timeout|timed out|connection refused|econnrefused|enotfound|dns error")
        .expect("static pattern")
});
static CAPABILITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)does not support|not supported|unsupported").expect("static pattern")
});

/// Classify a raw provider failure and, where applicable, attach an
/// alternative recommendation.
pub fn classify(
    raw: &str,
    provider: ProviderId,
    model: &str,
    message: Option<&str>,
    media: Option<&Media>,
) -> ClassifiedFailure {
    let kind = match_kind(raw);

    let provider_name = catalog::find_provider(provider)
        .map(|p| p.display_name.clone())
        .unwrap_or_else(|| provider.to_string());

    let (user_message, suggestion) = describe(kind, &provider_name, model, raw);

    let alternative = kind
        .wants_alternative()
        .then(|| recommend_alternative(provider, message, media));

    ClassifiedFailure {
        kind,
        raw: raw.to_string(),
        user_message,
        suggestion,
        alternative,
        status: kind.status(),
    }
}

fn match_kind(raw: &str) -> FailureKind {
    if API_KEY_PATTERN.is_match(raw) {
        FailureKind::ApiKeyMissing
    } else if QUOTA_PATTERN.is_match(raw) {
        FailureKind::QuotaExceeded
    } else if RATE_PATTERN.is_match(raw) {
        FailureKind::RateLimit
    } else if NETWORK_PATTERN.is_match(raw) {
        FailureKind::NetworkError
    } else if CAPABILITY_PATTERN.is_match(raw) {
        FailureKind::ModelCapability
    } else {
        FailureKind::Unknown
    }
}

fn describe(kind: FailureKind, provider_name: &str, model: &str, raw: &str) -> (String, String) {
    match kind {
        FailureKind::ApiKeyMissing => (
            format!("{} API key is not configured or invalid", provider_name),
            format!(
                "Set the API key for {} in the configuration file or environment, then retry",
                provider_name
            ),
        ),
        FailureKind::QuotaExceeded => (
            format!("Quota for {} is used up", model),
            "Switch to the suggested alternative model to keep going".to_string(),
        ),
        FailureKind::RateLimit => (
            "Requests are coming in too fast".to_string(),
            "Wait a moment and retry, or switch to another model".to_string(),
        ),
        FailureKind::NetworkError => (
            "Network connection failed".to_string(),
            "Check your network connection and retry".to_string(),
        ),
        FailureKind::ModelCapability => (
            if raw.contains("video") {
                "This model does not support video input".to_string()
            } else {
                "This model does not support the requested feature".to_string()
            },
            "Pick a model that supports this feature".to_string(),
        ),
        FailureKind::Unknown => (
            "The service is temporarily unavailable".to_string(),
            "Retry later or switch to another model".to_string(),
        ),
    }
}
