//! Tool-call extraction from raw model output.
//!
//! The producing model is told to emit exactly one bare JSON object with
//! `tool_name` and `arguments`, but real completions wrap it in code fences,
//! surround it with prose, or add trailing commentary. Extraction is an
//! ordered cascade of increasingly permissive strategies; the first tier
//! that yields at least one valid call wins and later tiers are skipped.
//!
//! | Tier | Strategy |
//! |------|----------|
//! | 1 | ```` ```json ```` fenced blocks anywhere in the text |
//! | 2 | Standalone lines that trim to a single `{...}` object |
//! | 3 | Generic ``` fenced blocks containing `{...}` |
//! | 4 | First `{` to last `}` over the whole text |
//!
//! Precision is sacrificed for recall: every candidate that fails to parse
//! is silently skipped, and a malformed candidate never aborts the
//! user-visible response.

use super::entities::ToolCall;
use regex::Regex;
use std::sync::LazyLock;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```json\s*(\{[\s\S]*?\})\s*```").expect("static pattern")
});

static BARE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```\s*(\{[\s\S]*?\})\s*```").expect("static pattern")
});

/// Scan model output for embedded tool invocations.
///
/// Returns calls in source order. An empty result means "no tool call
/// present"; this function never fails.
pub fn extract_tool_calls(text: &str) -> Vec<ToolCall> {
    // Tier 1: ```json fenced blocks
    let calls = extract_from_pattern(&JSON_FENCE, text);
    if !calls.is_empty() {
        return calls;
    }

    // Tier 2: standalone single-line JSON objects
    let calls = extract_from_lines(text);
    if !calls.is_empty() {
        return calls;
    }

    // Tier 3: untagged fenced blocks
    let calls = extract_from_pattern(&BARE_FENCE, text);
    if !calls.is_empty() {
        return calls;
    }

    // Tier 4: outermost brace span across the whole text
    extract_from_brace_span(text)
}

fn extract_from_pattern(pattern: &Regex, text: &str) -> Vec<ToolCall> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| parse_candidate(caps.get(1)?.as_str()))
        .collect()
}

fn extract_from_lines(text: &str) -> Vec<ToolCall> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with('{') && trimmed.ends_with('}') && trimmed.contains("tool_name")
            {
                parse_candidate(trimmed)
            } else {
                None
            }
        })
        .collect()
}

fn extract_from_brace_span(text: &str) -> Vec<ToolCall> {
    let Some(first) = text.find('{') else {
        return Vec::new();
    };
    let Some(last) = text.rfind('}') else {
        return Vec::new();
    };
    if last <= first {
        return Vec::new();
    }

    // Prose with incidental braces must not trigger a parse attempt
    let span = &text[first..=last];
    if !span.contains("tool_name") {
        return Vec::new();
    }

    parse_candidate(span).into_iter().collect()
}

/// Parse one candidate string; keep it only when both `tool_name` and
/// `arguments` are present and well-typed. Parse failures are swallowed.
fn parse_candidate(candidate: &str) -> Option<ToolCall> {
    let value: serde_json::Value = serde_json::from_str(candidate).ok()?;
    let tool_name = value.get("tool_name")?.as_str()?.to_string();
    let arguments = value.get("arguments")?.as_object()?;

    Some(ToolCall {
        tool_name,
        arguments: arguments.clone().into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_fence_with_surrounding_prose() {
        let text = r#"Let me check the weather for you.

```json
{"tool_name": "get_weather", "arguments": {"city": "北京"}}
```

One moment please."#;

        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "get_weather");
        assert_eq!(calls[0].get_string("city"), Some("北京"));
    }

    #[test]
    fn test_two_json_fences_in_source_order() {
        // Tier 1 must not short-circuit after the first match in the tier
        let text = r#"```json
{"tool_name": "get_weather", "arguments": {"city": "上海"}}
```
and also
```json
{"tool_name": "get_current_time", "arguments": {}}
```"#;

        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tool_name, "get_weather");
        assert_eq!(calls[1].tool_name, "get_current_time");
    }

    #[test]
    fn test_standalone_line() {
        let text = "Sure, let me look that up.\n{\"tool_name\": \"search_web\", \"arguments\": {\"query\": \"rust\"}}\n";
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "search_web");
    }

    #[test]
    fn test_untagged_fence() {
        let text = "```\n{\"tool_name\": \"calculate\", \"arguments\": {\"expression\": \"2+2\"}}\n```";
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "calculate");
    }

    #[test]
    fn test_multiline_bare_json() {
        let text = r#"Here is the call:
{
  "tool_name": "get_weather",
  "arguments": {
    "city": "深圳",
    "date": "明天"
  }
}"#;
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get_string("date"), Some("明天"));
    }

    #[test]
    fn test_no_braces_returns_empty() {
        assert!(extract_tool_calls("The weather in Beijing is usually dry.").is_empty());
    }

    #[test]
    fn test_incidental_braces_without_tool_name() {
        // Tier 4 pre-check: prose braces must not reach the parser
        let text = "Sets are written like {1, 2, 3} and maps like {a: 1}.";
        assert!(extract_tool_calls(text).is_empty());
    }

    #[test]
    fn test_malformed_candidate_is_skipped() {
        let text = "```json\n{\"tool_name\": \"get_weather\", \"arguments\": {broken}\n```";
        assert!(extract_tool_calls(text).is_empty());
    }

    #[test]
    fn test_missing_arguments_is_discarded() {
        let text = "```json\n{\"tool_name\": \"get_weather\"}\n```";
        assert!(extract_tool_calls(text).is_empty());
    }

    #[test]
    fn test_first_matching_tier_wins() {
        // A valid fenced call plus a bare-line call: tier 1 wins, tier 2 skipped
        let text = "```json\n{\"tool_name\": \"get_weather\", \"arguments\": {\"city\": \"a\"}}\n```\n{\"tool_name\": \"calculate\", \"arguments\": {\"expression\": \"1\"}}";
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "get_weather");
    }

    #[test]
    fn test_unregistered_tool_name_still_extracted() {
        // Validity against the registry is checked at execution time
        let text = "{\"tool_name\": \"send_email\", \"arguments\": {\"to\": \"a@b.c\"}}";
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "send_email");
    }
}
