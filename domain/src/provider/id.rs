//! Provider identifier value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Known LLM providers (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Google,
    Qwen,
    DeepSeek,
    Kimi,
}

impl ProviderId {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Google => "google",
            ProviderId::Qwen => "qwen",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Kimi => "kimi",
        }
    }

    /// All known providers, in catalog order
    pub fn all() -> &'static [ProviderId] {
        &[
            ProviderId::Google,
            ProviderId::Qwen,
            ProviderId::DeepSeek,
            ProviderId::Kimi,
        ]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(ProviderId::Google),
            "qwen" => Ok(ProviderId::Qwen),
            "deepseek" => Ok(ProviderId::DeepSeek),
            "kimi" => Ok(ProviderId::Kimi),
            other => Err(crate::core::error::DomainError::UnknownProvider(
                other.to_string(),
            )),
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_roundtrip() {
        for id in ProviderId::all() {
            let parsed: ProviderId = id.as_str().parse().unwrap();
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn test_unknown_provider_is_error() {
        assert!("mistral".parse::<ProviderId>().is_err());
    }
}
