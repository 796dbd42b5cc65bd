//! Current time tool

use chrono::Local;
use conductor_domain::ToolCall;

/// Run one `get_current_time` call.
///
/// A `format` argument is accepted for forward compatibility but the
/// output always uses the fixed local-time format below.
pub fn run(_call: &ToolCall) -> String {
    format!("当前时间：{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_output_has_fixed_format() {
        let output = run(&ToolCall::new("get_current_time"));
        let stamp = output.strip_prefix("当前时间：").unwrap();
        assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_format_argument_is_tolerated() {
        let call = ToolCall::new("get_current_time").with_arg("format", "iso");
        assert!(run(&call).starts_with("当前时间："));
    }
}
