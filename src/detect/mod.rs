//! Query detectors and argument extractors.
//!
//! Each subject owns a detector configuration: the patterns that decide
//! whether a tool is needed and an ordered chain of extractors that derive the
//! tool's arguments. Detection is pattern based. Outcomes are reported as
//! [`Outcome`] values so agents can tell a detector that never fired apart
//! from one that fired but could not produce usable arguments.

pub mod chemistry;
pub mod math;
pub mod physics;

pub use chemistry::ChemistryDetector;
pub use math::MathDetector;
pub use physics::{ConversionRequest, PhysicsDetector};

use regex::{Captures, Regex};

/// Result of running one detector (and possibly its tool) against a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The detector did not fire.
    Skipped,
    /// The detector fired but no arguments could be extracted.
    Miss,
    /// Arguments were extracted but the tool produced nothing usable.
    Failed(String),
    /// Usable data.
    Hit(T),
}

impl<T> Outcome<T> {
    pub fn hit(self) -> Option<T> {
        match self {
            Outcome::Hit(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit(_))
    }

    /// Whether the detector fired at all.
    pub fn fired(&self) -> bool {
        !matches!(self, Outcome::Skipped)
    }

    /// Chain a fallible tool call onto a successful extraction.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Hit(value) => f(value),
            Outcome::Skipped => Outcome::Skipped,
            Outcome::Miss => Outcome::Miss,
            Outcome::Failed(reason) => Outcome::Failed(reason),
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Skipped => "skipped",
            Outcome::Miss => "miss",
            Outcome::Failed(_) => "failed",
            Outcome::Hit(_) => "hit",
        }
    }
}

/// An ordered set of regular expressions; matches if any member does.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    pub fn new(patterns: &[&str]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("Invalid regex"))
                .collect(),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Builds a value from a pattern's captures, or rejects the match.
pub type Extract<T> = fn(&Captures<'_>) -> Option<T>;

impl<T> Default for ExtractorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Extraction patterns tried in priority order.
///
/// For each pattern, every match is offered to its extract function in turn;
/// the first accepted value wins.
pub struct ExtractorChain<T> {
    steps: Vec<(Regex, Extract<T>)>,
}

impl<T> ExtractorChain<T> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a pattern with its extract function.
    pub fn step(mut self, pattern: &str, extract: Extract<T>) -> Self {
        self.steps
            .push((Regex::new(pattern).expect("Invalid regex"), extract));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self, text: &str) -> Option<T> {
        self.steps.iter().find_map(|(pattern, extract)| {
            pattern
                .captures_iter(text)
                .find_map(|caps| extract(&caps))
        })
    }
}
