//! Static tool registry
//!
//! The catalog of tools the model may call. Defined once at process start
//! and never mutated; consumed for prompt rendering and argument checks.

use super::entities::{ToolDefinition, ToolParameter};
use std::sync::LazyLock;

static TOOLS: LazyLock<Vec<ToolDefinition>> = LazyLock::new(|| {
    vec![
        ToolDefinition::new(
            "get_weather",
            "Get weather for a city: current conditions plus a 7-day forecast",
        )
        .with_parameter(ToolParameter::new(
            "city",
            "City name, e.g. 北京, Shanghai, Tokyo",
            true,
        ))
        .with_parameter(ToolParameter::new(
            "date",
            "Date, e.g. today, tomorrow, 2026-01-20. Defaults to today",
            false,
        )),
        ToolDefinition::new("search_web", "Search the web for up-to-date information")
            .with_parameter(ToolParameter::new("query", "The search query", true)),
        ToolDefinition::new("calculate", "Evaluate an arithmetic expression").with_parameter(
            ToolParameter::new("expression", "Arithmetic expression, e.g. 2+3*4", true),
        ),
        ToolDefinition::new("get_current_time", "Get the current wall-clock time")
            .with_parameter(ToolParameter::new(
                "format",
                "Optional format hint, e.g. 'YYYY-MM-DD HH:mm:ss'",
                false,
            )),
    ]
});

/// All registered tools, in declaration order
pub fn tools() -> &'static [ToolDefinition] {
    &TOOLS
}

/// Look up a tool definition by exact name
pub fn find_tool(name: &str) -> Option<&'static ToolDefinition> {
    TOOLS.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolKind;

    #[test]
    fn test_registry_matches_tool_kinds() {
        // Every registered tool maps to a ToolKind and vice versa
        assert_eq!(tools().len(), ToolKind::all().len());
        for tool in tools() {
            assert!(ToolKind::from_name(&tool.name).is_some());
        }
    }

    #[test]
    fn test_tool_names_unique() {
        let mut names: Vec<_> = tools().iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), tools().len());
    }

    #[test]
    fn test_required_parameters() {
        let weather = find_tool("get_weather").unwrap();
        assert!(weather.parameters.iter().any(|p| p.name == "city" && p.required));
        assert!(weather.parameters.iter().any(|p| p.name == "date" && !p.required));

        let time = find_tool("get_current_time").unwrap();
        assert!(time.parameters.iter().all(|p| !p.required));
    }
}
