//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed set of tools the orchestrator knows how to run.
///
/// Dispatch goes through an exhaustive match on this enum, so adding or
/// removing a tool is a compile-time-checked change rather than a runtime
/// lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GetWeather,
    SearchWeb,
    Calculate,
    GetCurrentTime,
}

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::GetWeather => "get_weather",
            ToolKind::SearchWeb => "search_web",
            ToolKind::Calculate => "calculate",
            ToolKind::GetCurrentTime => "get_current_time",
        }
    }

    /// Resolve a tool name emitted by the model. Unknown names stay `None`;
    /// the executor turns them into a descriptive error string.
    pub fn from_name(name: &str) -> Option<ToolKind> {
        match name {
            "get_weather" => Some(ToolKind::GetWeather),
            "search_web" => Some(ToolKind::SearchWeb),
            "calculate" => Some(ToolKind::Calculate),
            "get_current_time" => Some(ToolKind::GetCurrentTime),
            _ => None,
        }
    }

    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::GetWeather,
            ToolKind::SearchWeb,
            ToolKind::Calculate,
            ToolKind::GetCurrentTime,
        ]
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool exposed to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g. "get_weather")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Parameter type hint (e.g. "string")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// A tool invocation extracted from model output.
///
/// Not guaranteed to reference a registered tool or satisfy its schema;
/// validity is checked at execution time, not at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or a message suitable for embedding
    /// in the tool's error output
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }
}

/// Record of one executed tool call.
///
/// `result` is a serialized payload (JSON where structured) or an
/// error-describing string; execution failures never surface as anything
/// other than a result string, so one failing tool cannot abort a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRecord {
    pub tool_name: String,
    pub arguments: HashMap<String, serde_json::Value>,
    pub result: String,
}

impl ToolRecord {
    pub fn new(call: &ToolCall, result: impl Into<String>) -> Self {
        Self {
            tool_name: call.tool_name.clone(),
            arguments: call.arguments.clone(),
            result: result.into(),
        }
    }

    /// Parse the result back as JSON, for structured payloads
    /// (weather, search)
    pub fn result_json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.result).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_roundtrip() {
        for kind in ToolKind::all() {
            assert_eq!(ToolKind::from_name(kind.as_str()), Some(*kind));
        }
        assert_eq!(ToolKind::from_name("rm_rf"), None);
    }

    #[test]
    fn test_tool_definition_builder() {
        let tool = ToolDefinition::new("get_weather", "Get weather for a city")
            .with_parameter(ToolParameter::new("city", "City name", true))
            .with_parameter(ToolParameter::new("date", "Date", false));

        assert_eq!(tool.name, "get_weather");
        assert_eq!(tool.parameters.len(), 2);
        assert!(tool.parameters[0].required);
        assert!(!tool.parameters[1].required);
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::new("get_weather").with_arg("city", "北京");

        assert_eq!(call.get_string("city"), Some("北京"));
        assert_eq!(call.require_string("city").unwrap(), "北京");
        assert!(call.require_string("date").is_err());
    }

    #[test]
    fn test_weather_record_json_roundtrip() {
        let call = ToolCall::new("get_weather").with_arg("city", "北京");
        let payload = serde_json::json!({"location": "北京", "current": {"temp": 3}});
        let record = ToolRecord::new(&call, payload.to_string());

        let serialized = serde_json::to_string(&record).unwrap();
        let restored: ToolRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(restored.result_json().unwrap(), payload);
    }

    #[test]
    fn test_search_record_json_roundtrip() {
        let call = ToolCall::new("search_web").with_arg("query", "rust");
        let payload = serde_json::json!({
            "query": "rust",
            "answer": "A systems programming language",
            "results": [
                {"title": "Rust", "url": "https://rust-lang.org", "content": "Fast, reliable"}
            ]
        });
        let record = ToolRecord::new(&call, payload.to_string());

        let serialized = serde_json::to_string(&record).unwrap();
        let restored: ToolRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(restored.result_json().unwrap(), payload);
    }
}
