//! Arithmetic tool
//!
//! Expressions pass a character whitelist before evaluation, so nothing
//! beyond digits, the four operators, parentheses, decimal points, and
//! whitespace ever reaches the evaluator.

use conductor_domain::ToolCall;

/// Run one `calculate` call and return its result string
pub fn run(call: &ToolCall) -> String {
    let expression = call.get_string("expression").unwrap_or_default();
    if expression.is_empty() {
        return "错误: 缺少计算表达式".to_string();
    }

    if !expression
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || "+-*/().".contains(c))
    {
        return "错误: 表达式包含不允许的字符".to_string();
    }

    match evaluate(expression) {
        Ok(value) => format!("计算结果: {} = {}", expression, format_number(value)),
        Err(e) => format!("计算错误: {}", e),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn evaluate(expression: &str) -> Result<f64, String> {
    let mut parser = Parser {
        chars: expression.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
    };
    let value = parser.expr()?;
    if parser.pos < parser.chars.len() {
        return Err(format!("意外的字符 '{}'", parser.chars[parser.pos]));
    }
    Ok(value)
}

/// Recursive-descent evaluator over +, -, *, /, unary minus, and parens
struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.pos += 1;
                    value += self.term()?;
                }
                '-' => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                '/' => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err("除数不能为零".to_string());
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expr()?;
                if self.peek() != Some(')') {
                    return Err("缺少右括号".to_string());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(format!("意外的字符 '{}'", c)),
            None => Err("表达式不完整".to_string()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse()
            .map_err(|_| format!("无效的数字 '{}'", literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(expression: &str) -> String {
        run(&ToolCall::new("calculate").with_arg("expression", expression))
    }

    #[test]
    fn test_operator_precedence() {
        assert_eq!(calc("2+3*4"), "计算结果: 2+3*4 = 14");
    }

    #[test]
    fn test_parens_and_division() {
        assert_eq!(calc("(2+3)*4"), "计算结果: (2+3)*4 = 20");
        assert_eq!(calc("7/2"), "计算结果: 7/2 = 3.5");
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(calc("-3+5"), "计算结果: -3+5 = 2");
        assert_eq!(calc("2*-3"), "计算结果: 2*-3 = -6");
    }

    #[test]
    fn test_whitespace_allowed() {
        assert_eq!(calc(" 1 + 2 "), "计算结果:  1 + 2  = 3");
    }

    #[test]
    fn test_forbidden_characters_rejected() {
        assert_eq!(calc("2+a"), "错误: 表达式包含不允许的字符");
        assert_eq!(calc("1;2"), "错误: 表达式包含不允许的字符");
        assert_eq!(calc("`rm`"), "错误: 表达式包含不允许的字符");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(calc("1/0"), "计算错误: 除数不能为零");
    }

    #[test]
    fn test_malformed_expression() {
        assert!(calc("2+").starts_with("计算错误:"));
        assert!(calc("(1+2").starts_with("计算错误:"));
        assert!(calc("1..2").starts_with("计算错误:"));
    }

    #[test]
    fn test_missing_expression() {
        assert_eq!(
            run(&ToolCall::new("calculate")),
            "错误: 缺少计算表达式"
        );
    }
}
