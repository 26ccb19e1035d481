//! Arithmetic detection and expression extraction.

use regex::{Captures, Regex};

use super::{ExtractorChain, Outcome, PatternSet};

const NEEDS_CALCULATION: &[&str] = &[
    r"\d+(?:\.\d+)?\s*(?:\*\*|[-+*/×÷^%x])\s*[-(]?\d",
    r"\b(?:plus|minus|times|multiplied by|divided by|squared|cubed|to the power of|raised to)\b",
    r"\b(?:square root|cube root|percent of)\b",
    r"\d\s*%\s*of\b",
    r"\b(?:sqrt|sin|cos|tan|asin|acos|atan|sinh|cosh|tanh|log|log10|log2|exp|factorial|abs)\s*\(",
    r"\b(?:calculate|compute|evaluate|solve|what is|what's|find)\s+[-(√]?\d",
    r"√\s*\d",
    r"\d\s*!",
];

const ARITHMETIC: &str = r"-?\d+(?:\.\d+)?(?:\s*(?:\*\*|[-+*/×÷x%])\s*-?\d+(?:\.\d+)?)+";

const WORD_OPERATORS: &[(&str, &str)] = &[
    (r"\bmultiplied by\b", "*"),
    (r"\bdivided by\b", "/"),
    (r"\btimes\b", "*"),
    (r"\bplus\b", "+"),
    (r"\bminus\b", "-"),
];

fn percent_of(caps: &Captures<'_>) -> Option<String> {
    Some(format!("({}/100)*{}", &caps[1], &caps[2]))
}

fn named_root(caps: &Captures<'_>) -> Option<String> {
    match &caps[1] {
        "square" => Some(format!("sqrt({})", &caps[2])),
        _ => Some(format!("{}**(1/3)", &caps[2])),
    }
}

fn radical(caps: &Captures<'_>) -> Option<String> {
    Some(format!("sqrt({})", &caps[1]))
}

fn power_word(caps: &Captures<'_>) -> Option<String> {
    let exponent = if &caps[2] == "squared" { 2 } else { 3 };
    Some(format!("{}**{}", &caps[1], exponent))
}

fn exponent(caps: &Captures<'_>) -> Option<String> {
    Some(format!("{}**{}", &caps[1], &caps[2]))
}

fn generic(caps: &Captures<'_>) -> Option<String> {
    let rest = strip_sentence_end(caps[1].trim());
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

/// Drop trailing full stops and exclamation marks, keeping a factorial `N!`.
fn strip_sentence_end(text: &str) -> &str {
    let mut rest = text;
    loop {
        let stripped = match rest.strip_suffix('.') {
            Some(s) => s,
            None => match rest.strip_suffix('!') {
                Some(s) if !s.ends_with(|c: char| c.is_ascii_digit()) => s,
                _ => break,
            },
        };
        rest = stripped.trim_end();
    }
    rest
}

/// Decides whether a math question needs the calculator and pulls out the
/// expression to evaluate.
pub struct MathDetector {
    needs: PatternSet,
    leading: ExtractorChain<String>,
    word_operators: Vec<(Regex, &'static str)>,
    arithmetic: Regex,
    trailing: ExtractorChain<String>,
}

impl MathDetector {
    pub fn new() -> Self {
        Self {
            needs: PatternSet::new(NEEDS_CALCULATION),
            leading: ExtractorChain::new()
                .step(
                    r"(\d+(?:\.\d+)?)\s*(?:%|percent)\s+of\s+(\d+(?:\.\d+)?)",
                    percent_of,
                )
                .step(r"\b(square|cube) root of\s+(\d+(?:\.\d+)?)", named_root)
                .step(r"√\s*(\d+(?:\.\d+)?)", radical)
                .step(r"(\d+(?:\.\d+)?)\s+(squared|cubed)\b", power_word),
            word_operators: WORD_OPERATORS
                .iter()
                .map(|(p, op)| (Regex::new(p).expect("Invalid regex"), *op))
                .collect(),
            arithmetic: Regex::new(ARITHMETIC).expect("Invalid regex"),
            trailing: ExtractorChain::new()
                .step(
                    r"(\d+(?:\.\d+)?)\s*(?:\^|\*\*|to the power of|raised to(?: the power of)?)\s*(-?\d+(?:\.\d+)?)",
                    exponent,
                )
                .step(
                    r"(?:calculate|solve|compute|evaluate|what is|find)\s+([^?]+)",
                    generic,
                ),
        }
    }

    pub fn needs_calculation(&self, query: &str) -> bool {
        self.needs.is_match(&query.to_lowercase())
    }

    /// Best-effort expression for the calculator.
    ///
    /// Falls back to the raw query when nothing more specific matches.
    pub fn extract_expression(&self, query: &str) -> String {
        let lower = query.to_lowercase();

        if let Some(expr) = self.leading.first(&lower) {
            return expr;
        }

        let mut symbolic = lower.clone();
        for (pattern, op) in &self.word_operators {
            symbolic = pattern.replace_all(&symbolic, *op).into_owned();
        }
        if let Some(m) = self.arithmetic.find(&symbolic) {
            return m.as_str().trim().to_string();
        }

        self.trailing
            .first(&lower)
            .unwrap_or_else(|| query.to_string())
    }

    pub fn detect(&self, query: &str) -> Outcome<String> {
        if !self.needs_calculation(query) {
            return Outcome::Skipped;
        }
        Outcome::Hit(self.extract_expression(query))
    }
}

impl Default for MathDetector {
    fn default() -> Self {
        Self::new()
    }
}
