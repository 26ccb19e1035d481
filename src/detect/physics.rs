//! Physics detectors: constants, unit conversions and formula lookups.
//!
//! The three detectors are independent. A single question can fire any
//! combination of them.

use regex::Captures;
use serde::Serialize;

use super::{ExtractorChain, Outcome, PatternSet};
use crate::tools::{ConstantRecord, ConstantsTable};

/// Phrases that suggest a constant is wanted even when no alias matches.
const CONSTANT_TRIGGERS: &[&str] = &["constant", "c =", "g ="];

const CONVERSION_TRIGGERS: &[&str] = &[
    r"\bconvert\b",
    r"\bhow\s+many\s+°?[a-z/]+.*\bin\b",
    r"-?\d+(?:\.\d+)?\s*(?:degrees?\s+)?°?[a-z][a-z/]*(?:\s+per\s+[a-z]+)?\s+(?:to|into|in)\s+(?:degrees?\s+)?°?[a-z]",
];

const FORMULA_TRIGGERS: &[&str] = &[
    r"\b(?:formula|equation|law|energy|force|momentum|power|work|velocity|acceleration|impulse|wave|frequency|wavelength|voltage|current|resistance|refraction|projectile|gravitation\w*|spring|electric field)\b",
];

/// Words never used as formula search terms.
const STOPWORDS: &[&str] = &[
    "what", "whats", "the", "and", "for", "how", "does", "are", "with", "this", "that", "from",
    "into", "calculate", "formula", "formulas", "equation", "equations", "explain", "find", "use",
    "using", "when", "why", "which", "can", "you", "please", "about", "give", "show", "tell",
    "between", "its", "there", "their", "describe", "define", "definition", "relation",
    "relationship", "object", "used", "need", "know", "want",
];

const NUM: &str = r"(-?\d+(?:\.\d+)?)";
const UNIT: &str = r"((?:degrees?\s+)?°?[a-z][a-z/]*(?:\s+per\s+[a-z]+)?)";

/// Arguments for the unit converter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRequest {
    pub value: f64,
    pub from: String,
    pub to: String,
}

fn value_from_to(caps: &Captures<'_>) -> Option<ConversionRequest> {
    Some(ConversionRequest {
        value: caps[1].parse().ok()?,
        from: caps[2].trim().to_string(),
        to: caps[3].trim().to_string(),
    })
}

fn how_many(caps: &Captures<'_>) -> Option<ConversionRequest> {
    Some(ConversionRequest {
        value: caps[2].parse().ok()?,
        from: caps[3].trim().to_string(),
        to: caps[1].trim().to_string(),
    })
}

/// Detector configuration for the physics agent.
pub struct PhysicsDetector {
    constants: ConstantsTable,
    conversion_triggers: PatternSet,
    conversions: ExtractorChain<ConversionRequest>,
    formula_triggers: PatternSet,
}

impl PhysicsDetector {
    pub fn new() -> Self {
        Self {
            constants: ConstantsTable::new(),
            conversion_triggers: PatternSet::new(CONVERSION_TRIGGERS),
            conversions: ExtractorChain::new()
                .step(
                    &format!(r"\bconvert\s+{NUM}\s*{UNIT}\s+(?:to|into|in)\s+{UNIT}"),
                    value_from_to,
                )
                .step(&format!(r"{NUM}\s*{UNIT}\s+in\s+{UNIT}"), value_from_to)
                .step(&format!(r"{NUM}\s*{UNIT}\s+(?:to|into)\s+{UNIT}"), value_from_to)
                .step(
                    &format!(r"\bhow\s+many\s+{UNIT}\s+(?:are\s+)?(?:there\s+)?in\s+{NUM}\s*{UNIT}"),
                    how_many,
                ),
            formula_triggers: PatternSet::new(FORMULA_TRIGGERS),
        }
    }

    pub fn needs_constants(&self, query: &str) -> bool {
        let lower = query.to_lowercase();
        CONSTANT_TRIGGERS.iter().any(|t| lower.contains(t))
            || self
                .constants
                .aliases()
                .iter()
                .any(|(alias, _)| lower.contains(alias))
    }

    /// Constants named in the query, each at most once.
    pub fn detect_constants(&self, query: &str) -> Outcome<Vec<&'static ConstantRecord>> {
        if !self.needs_constants(query) {
            return Outcome::Skipped;
        }
        let found = self.constants.identify(query);
        if found.is_empty() {
            Outcome::Miss
        } else {
            Outcome::Hit(found)
        }
    }

    pub fn needs_conversion(&self, query: &str) -> bool {
        self.conversion_triggers.is_match(&query.to_lowercase())
    }

    pub fn extract_conversion(&self, query: &str) -> Option<ConversionRequest> {
        self.conversions.first(&query.to_lowercase())
    }

    pub fn detect_conversion(&self, query: &str) -> Outcome<ConversionRequest> {
        if !self.needs_conversion(query) {
            return Outcome::Skipped;
        }
        match self.extract_conversion(query) {
            Some(request) => Outcome::Hit(request),
            None => Outcome::Miss,
        }
    }

    pub fn needs_formula(&self, query: &str) -> bool {
        self.formula_triggers.is_match(&query.to_lowercase())
    }

    /// Search terms for the formula catalog: lowercase words of three or more
    /// letters, punctuation stripped, stopwords removed.
    pub fn formula_terms(&self, query: &str) -> Vec<String> {
        query
            .to_lowercase()
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
            })
            .filter(|word| word.chars().count() >= 3 && !STOPWORDS.contains(&word.as_str()))
            .collect()
    }

    pub fn detect_formula(&self, query: &str) -> Outcome<String> {
        if !self.needs_formula(query) {
            return Outcome::Skipped;
        }
        let terms = self.formula_terms(query);
        if terms.is_empty() {
            Outcome::Miss
        } else {
            Outcome::Hit(terms.join(" "))
        }
    }
}

impl Default for PhysicsDetector {
    fn default() -> Self {
        Self::new()
    }
}
