//! Safe arithmetic evaluator.
//!
//! Expressions are sanitized and rewritten into a small canonical arithmetic
//! syntax, then evaluated by `meval` against a context that only holds an
//! allow-listed set of functions and constants. Anything else is rejected,
//! and every failure is reported through [`CalculationResult`].

use meval::{Context, Expr};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::f64::consts::{E, PI, TAU};

/// Outcome of evaluating an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The sanitized, rewritten expression that was evaluated.
    pub expression: String,
    /// The expression as received.
    pub original_expression: String,
}

impl CalculationResult {
    fn ok(value: f64, expression: String, original: &str) -> Self {
        Self {
            success: true,
            result: Some(value),
            formatted_result: Some(format_result(value)),
            error: None,
            expression,
            original_expression: original.to_string(),
        }
    }

    fn failed(error: impl Into<String>, expression: String, original: &str) -> Self {
        Self {
            success: false,
            result: None,
            formatted_result: None,
            error: Some(error.into()),
            expression,
            original_expression: original.to_string(),
        }
    }
}

impl std::fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.formatted_result, &self.error) {
            (Some(value), _) => write!(f, "{} = {}", self.expression, value),
            (None, Some(error)) => write!(f, "could not evaluate '{}': {}", self.original_expression, error),
            (None, None) => write!(f, "could not evaluate '{}'", self.original_expression),
        }
    }
}

/// Word and symbol operators rewritten before evaluation, longest phrases first.
const WORD_OPERATORS: &[(&str, &str)] = &[
    (r"\bto the power of\b", "**"),
    (r"\braised to(?: the power of)?\b", "**"),
    (r"\bdivided by\b", "/"),
    (r"\bmultiplied by\b", "*"),
    (r"\btimes\b", "*"),
    (r"\bplus\b", "+"),
    (r"\bminus\b", "-"),
    (r"\bmodulo\b", "%"),
];

/// Expression evaluator with a fixed function allow-list.
pub struct Calculator {
    disallowed: Regex,
    times_x: Regex,
    word_operators: Vec<(Regex, &'static str)>,
    root_number: Regex,
    implicit_pi: Regex,
    percent: Regex,
    factorial: Regex,
}

impl Calculator {
    pub fn new() -> Self {
        let word_operators = WORD_OPERATORS
            .iter()
            .map(|(pattern, replacement)| {
                (Regex::new(pattern).expect("Invalid regex"), *replacement)
            })
            .collect();

        Self {
            disallowed: Regex::new(r"[^0-9A-Za-z+\-*/%^().,!\s×÷√π]").expect("Invalid regex"),
            times_x: Regex::new(r"([0-9.)])\s*[xX×]\s*([0-9.(√π])").expect("Invalid regex"),
            word_operators,
            root_number: Regex::new(r"√\s*(\d+(?:\.\d+)?)").expect("Invalid regex"),
            implicit_pi: Regex::new(r"([0-9)])\s*π").expect("Invalid regex"),
            percent: Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("Invalid regex"),
            factorial: Regex::new(r"(\d+)\s*!").expect("Invalid regex"),
        }
    }

    /// Evaluate an expression. Never panics; failures come back with `success: false`.
    pub fn evaluate(&self, expression: &str) -> CalculationResult {
        let clean = self.sanitize(expression);

        if clean.is_empty() {
            return CalculationResult::failed(
                "No valid mathematical expression found",
                clean,
                expression,
            );
        }

        if let Err(error) = check_limits(&clean) {
            return CalculationResult::failed(error, clean, expression);
        }

        match evaluate_canonical(&clean) {
            Ok(value) => CalculationResult::ok(value, clean, expression),
            Err(error) => CalculationResult::failed(
                format!("Could not evaluate expression '{}': {}", clean, error),
                clean,
                expression,
            ),
        }
    }

    /// Strip disallowed characters and rewrite operators into canonical form.
    pub fn sanitize(&self, expression: &str) -> String {
        let mut text = self.disallowed.replace_all(expression, "").into_owned();

        // `2x3x4` needs two passes because matches cannot overlap.
        loop {
            let next = self.times_x.replace_all(&text, "${1}*${2}").into_owned();
            if next == text {
                break;
            }
            text = next;
        }

        for (pattern, replacement) in &self.word_operators {
            text = pattern.replace_all(&text, *replacement).into_owned();
        }

        text = text.replace('×', "*").replace('÷', "/").replace('^', "**");
        text = self.root_number.replace_all(&text, "sqrt(${1})").into_owned();
        text = text.replace('√', "sqrt");
        text = self.implicit_pi.replace_all(&text, "${1}*π").into_owned();
        text = text.replace('π', &format!("({})", PI));

        text = self.rewrite_percentages(&text);
        text = self.factorial.replace_all(&text, "factorial(${1})").into_owned();

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// `N%` becomes `(N/100)` unless an operand follows, in which case `%` is modulo.
    fn rewrite_percentages(&self, text: &str) -> String {
        self.percent
            .replace_all(text, |caps: &Captures<'_>| {
                let end = caps.get(0).map_or(text.len(), |m| m.end());
                let operand_follows = text[end..]
                    .chars()
                    .find(|c| !c.is_whitespace())
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '(' || c == '.');
                if operand_follows {
                    caps[0].to_string()
                } else {
                    format!("({}/100)", &caps[1])
                }
            })
            .into_owned()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a numeric result for display.
///
/// NaN is "undefined", infinities are "infinity", integral values print as
/// plain integers, very small or very large values use scientific notation
/// and everything else is fixed to six decimals with trailing zeros removed.
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return "undefined".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "infinity" } else { "-infinity" }.to_string();
    }
    if value.fract() == 0.0 {
        if value == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", value);
    }
    if value.abs() < 0.001 || value.abs() > 1_000_000.0 {
        return scientific(value, 2);
    }
    let fixed = format!("{:.6}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Scientific notation with a signed, at least two-digit exponent
/// (`1.23e-04`, `6.022141e+23`).
pub(crate) fn scientific(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.unsigned_abs()
            ),
            Err(_) => raw,
        },
        None => raw,
    }
}

/// Longest canonical expression the evaluator accepts.
const MAX_EXPRESSION_LEN: usize = 500;

/// Deepest parenthesis nesting the evaluator accepts.
const MAX_NESTING: usize = 32;

fn check_limits(expression: &str) -> Result<(), String> {
    if expression.chars().count() > MAX_EXPRESSION_LEN {
        return Err(format!(
            "Expression too long (limit is {} characters)",
            MAX_EXPRESSION_LEN
        ));
    }

    let mut depth = 0usize;
    for c in expression.chars() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err("Expression too deeply nested".to_string());
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Evaluate an already-canonical expression.
///
/// `**` is handed to the engine as `^`. Domain errors inside allow-listed
/// functions come back as NaN and are reported as failures, as are infinite
/// results.
fn evaluate_canonical(expression: &str) -> Result<f64, String> {
    let expr: Expr = expression
        .replace("**", "^")
        .parse()
        .map_err(|e: meval::Error| e.to_string())?;

    let value = expr
        .eval_with_context(allow_list())
        .map_err(|e| e.to_string())?;

    if value.is_nan() {
        Err("math domain error".to_string())
    } else if value.is_infinite() {
        Err("division by zero or result too large".to_string())
    } else {
        Ok(value)
    }
}

/// The only names an expression may refer to.
fn allow_list<'a>() -> Context<'a> {
    let mut ctx = Context::empty();
    ctx.var("pi", PI)
        .var("e", E)
        .var("tau", TAU)
        .func("sin", f64::sin)
        .func("cos", f64::cos)
        .func("tan", f64::tan)
        .func("asin", f64::asin)
        .func("acos", f64::acos)
        .func("atan", f64::atan)
        .func2("atan2", f64::atan2)
        .func("sinh", f64::sinh)
        .func("cosh", f64::cosh)
        .func("tanh", f64::tanh)
        .func("asinh", f64::asinh)
        .func("acosh", f64::acosh)
        .func("atanh", |x| if x.abs() < 1.0 { x.atanh() } else { f64::NAN })
        .func("sqrt", f64::sqrt)
        .funcn("log", log, 1..3)
        .func("log10", |x| positive(x).log10())
        .func("log2", |x| positive(x).log2())
        .func("exp", f64::exp)
        .func("abs", f64::abs)
        .funcn("round", round, 1..3)
        .func("floor", f64::floor)
        .func("ceil", f64::ceil)
        .func("factorial", factorial)
        .funcn("gcd", gcd_all, 1..)
        .func2("pow", |x, y| if x == 0.0 && y < 0.0 { f64::NAN } else { x.powf(y) })
        .func("degrees", f64::to_degrees)
        .func("radians", f64::to_radians);
    ctx
}

/// Logarithms of non-positive values are domain errors, not `-inf`.
fn positive(x: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        f64::NAN
    }
}

fn log(args: &[f64]) -> f64 {
    match args {
        [x] => positive(*x).ln(),
        [x, base] if *base > 0.0 && *base != 1.0 => positive(*x).ln() / base.ln(),
        _ => f64::NAN,
    }
}

/// Half-to-even rounding, optionally to a number of decimal digits.
fn round(args: &[f64]) -> f64 {
    match args {
        [x] => x.round_ties_even(),
        [x, digits] if digits.fract() == 0.0 => {
            let scale = 10f64.powi(*digits as i32);
            (x * scale).round_ties_even() / scale
        }
        _ => f64::NAN,
    }
}

fn factorial(n: f64) -> f64 {
    if n < 0.0 || n.fract() != 0.0 {
        return f64::NAN;
    }
    if n > 170.0 {
        return f64::INFINITY;
    }
    (1..=n as u64).fold(1.0, |acc, k| acc * k as f64)
}

fn gcd_all(args: &[f64]) -> f64 {
    if args.iter().any(|a| a.fract() != 0.0) {
        return f64::NAN;
    }
    args.iter().fold(0u64, |acc, a| gcd(acc, a.abs() as u64)) as f64
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expression: &str) -> CalculationResult {
        Calculator::new().evaluate(expression)
    }

    #[test]
    fn test_simple_addition() {
        let result = eval("2 + 2");
        assert!(result.success);
        assert_eq!(result.result, Some(4.0));
        assert_eq!(result.formatted_result.as_deref(), Some("4"));
        assert_eq!(result.original_expression, "2 + 2");
    }

    #[test]
    fn test_division_by_zero_is_failure() {
        let result = eval("10 / 0");
        assert!(!result.success);
        assert!(result.error.unwrap().contains("division by zero"));
        assert_eq!(result.expression, "10 / 0");
        assert_eq!(result.original_expression, "10 / 0");
    }

    #[test]
    fn test_unknown_names_fail_closed() {
        for input in ["import os", "__import__('os')", "open(1)", "x + 1", "exec(2)"] {
            let result = eval(input);
            assert!(!result.success, "{input} should fail");
            assert!(result.result.is_none());
        }
    }

    #[test]
    fn test_square_root_of_two_formats_as_decimal() {
        let result = eval("2 ** 0.5");
        assert!(result.success);
        assert_eq!(result.formatted_result.as_deref(), Some("1.414214"));
    }

    #[test]
    fn test_word_and_symbol_operators() {
        assert_eq!(eval("3 x 4").result, Some(12.0));
        assert_eq!(eval("2x3x4").result, Some(24.0));
        assert_eq!(eval("12 ÷ 4").result, Some(3.0));
        assert_eq!(eval("6 × 7").result, Some(42.0));
        assert_eq!(eval("2 plus 3 times 4").result, Some(14.0));
        assert_eq!(eval("2 to the power of 10").result, Some(1024.0));
        assert_eq!(eval("3 raised to 2").result, Some(9.0));
        assert_eq!(eval("2^8").result, Some(256.0));
        assert_eq!(eval("9 divided by 3").result, Some(3.0));
    }

    #[test]
    fn test_root_pi_percent_and_factorial_rewrites() {
        assert_eq!(eval("√16").result, Some(4.0));
        assert_eq!(eval("√(81)").result, Some(9.0));
        assert_eq!(eval("5!").result, Some(120.0));
        assert_eq!(eval("50%").result, Some(0.5));
        assert_eq!(eval("10 % 3").result, Some(1.0));
        assert_eq!(eval("2π").formatted_result.as_deref(), Some("6.283185"));
        assert!(eval("5!").expression.contains("factorial(5)"));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2**(-1)").result, Some(0.5));
        assert_eq!(eval("2**3**2").result, Some(512.0));
        assert_eq!(eval("2 + 3 * 4 ** 2").result, Some(50.0));
        assert_eq!(eval("(1 + 2) * 3").result, Some(9.0));
        assert_eq!(eval("10 % 4").result, Some(2.0));
    }

    #[test]
    fn test_allow_listed_functions() {
        assert_eq!(eval("sqrt(144)").result, Some(12.0));
        assert_eq!(eval("log(8, 2)").result, Some(3.0));
        assert_eq!(eval("log10(1000)").result, Some(3.0));
        assert_eq!(eval("gcd(12, 18)").result, Some(6.0));
        assert_eq!(eval("factorial(0)").result, Some(1.0));
        assert_eq!(eval("round(2.5)").result, Some(2.0));
        assert_eq!(eval("round(3.14159, 2)").result, Some(3.14));
        assert_eq!(eval("abs(-3)").result, Some(3.0));
        assert_eq!(eval("degrees(pi)").result, Some(180.0));
        assert_eq!(eval("exp(0)").result, Some(1.0));
        assert_eq!(eval("sin(0)").result, Some(0.0));
    }

    #[test]
    fn test_domain_and_syntax_errors() {
        assert!(!eval("sqrt(-1)").success);
        assert!(!eval("log(0)").success);
        assert!(!eval("asin(2)").success);
        assert!(!eval("factorial(2.5)").success);
        assert!(!eval("log(8, 1)").success);
        assert!(!eval("exp(1000)").success);
        assert!(!eval("(1 + 2").success);
        assert!(!eval("1 +").success);
        assert!(!eval("sqrt").success);
        assert!(!eval("pi(2)").success);
        assert!(!eval("sqrt(1, 2)").success);
    }

    #[test]
    fn test_empty_expression() {
        let result = eval("???");
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("No valid mathematical expression found")
        );
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(f64::NAN), "undefined");
        assert_eq!(format_result(f64::INFINITY), "infinity");
        assert_eq!(format_result(f64::NEG_INFINITY), "-infinity");
        assert_eq!(format_result(42.0), "42");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(format_result(0.0001234), "1.23e-04");
        assert_eq!(format_result(1234567.5), "1.23e+06");
        assert_eq!(format_result(-2.5e-12), "-2.50e-12");
        assert_eq!(format_result(1e20), "100000000000000000000");
    }

    #[test]
    fn test_oversized_input_fails_without_crashing() {
        let deep_unary = format!("1 + {}1", "-".repeat(100_000));
        let result = eval(&deep_unary);
        assert!(!result.success);
        assert!(result.error.unwrap().contains("too long"));

        let nested = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        let result = eval(&nested);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Expression too deeply nested"));

        let shallow = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(eval(&shallow).result, Some(1.0));
    }
}
