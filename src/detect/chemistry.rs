//! Chemistry detectors: element lookups and calculation requests.

use regex::{Captures, Regex};

use super::{ExtractorChain, Outcome, PatternSet};
use crate::tools::{ElementRecord, PeriodicTable};

const ELEMENT_TRIGGERS: &[&str] = &[
    // atomic properties
    r"atomic number of\s+\w+",
    r"what is the atomic number",
    r"atomic mass of\s+\w+",
    r"atomic weight of\s+\w+",
    r"mass number of\s+\w+",
    // electron configuration
    r"electron configuration of\s+\w+",
    r"electronic structure of\s+\w+",
    r"orbital configuration",
    // element properties
    r"properties of\s+\w+",
    r"characteristics of\s+\w+",
    r"information about\s+\w+",
    r"tell me about\s+\w+",
    // identification
    r"element\s+\w+",
    r"symbol for\s+\w+",
    r"chemical symbol",
    r"what element has",
    // position in the table
    r"group\s+\d+",
    r"period\s+\d+",
    r"which group",
    r"which period",
    r"family of elements",
    // common names
    r"\b(?:hydrogen|helium|lithium|beryllium|boron|carbon|nitrogen|oxygen|fluorine|neon)\b",
    r"\b(?:sodium|magnesium|aluminum|aluminium|silicon|phosphorus|sulfur|chlorine|argon)\b",
    r"\b(?:potassium|calcium|iron|copper|zinc|silver|gold|mercury|lead)\b",
];

/// Matched against the original casing so "Fe atom" is recognised.
const SYMBOL_TRIGGER: &str = r"\b[A-Z][a-z]?\b(?:\s+element|\s+atom)";

const CALCULATION_TRIGGERS: &[&str] = &[
    r"molecular weight",
    r"molar mass",
    r"formula weight",
    r"moles of",
    r"molarity",
    r"concentration",
    r"balanced equation",
    r"stoichiometry",
    r"percent composition",
    r"empirical formula",
    r"limiting reagent",
    r"theoretical yield",
];

/// Scanned in order when no extraction template produces an element.
const COMMON_ELEMENTS: &[&str] = &[
    "hydrogen",
    "helium",
    "lithium",
    "beryllium",
    "boron",
    "carbon",
    "nitrogen",
    "oxygen",
    "fluorine",
    "neon",
    "sodium",
    "magnesium",
    "aluminum",
    "silicon",
    "phosphorus",
    "sulfur",
    "chlorine",
    "argon",
    "potassium",
    "calcium",
    "iron",
    "copper",
    "zinc",
    "silver",
    "gold",
];

/// Informational line for calculation requests. No calculation is performed.
pub const CALCULATION_NOTE: &str = "Chemical calculations will be provided.";

fn known_element(caps: &Captures<'_>) -> Option<&'static ElementRecord> {
    PeriodicTable::new().lookup(&caps[1])
}

/// Detector configuration for the chemistry agent.
pub struct ChemistryDetector {
    table: PeriodicTable,
    element_triggers: PatternSet,
    symbol_trigger: Regex,
    extractors: ExtractorChain<&'static ElementRecord>,
    calculation_triggers: PatternSet,
}

impl ChemistryDetector {
    pub fn new() -> Self {
        Self {
            table: PeriodicTable::new(),
            element_triggers: PatternSet::new(ELEMENT_TRIGGERS),
            symbol_trigger: Regex::new(SYMBOL_TRIGGER).expect("Invalid regex"),
            extractors: ExtractorChain::new()
                .step(
                    r"(?:element|atom|atomic number of|atomic mass of|atomic weight of|properties of|electron configuration of|electronic structure of|symbol for)\s+(?:the\s+)?(\w+)",
                    known_element,
                )
                .step(r"tell me about\s+(\w+)", known_element)
                .step(r"information about\s+(\w+)", known_element)
                .step(r"what is\s+(\w+)", known_element)
                .step(r"(\w+)\s+(?:element|atom)", known_element),
            calculation_triggers: PatternSet::new(CALCULATION_TRIGGERS),
        }
    }

    pub fn needs_periodic_table(&self, query: &str) -> bool {
        self.symbol_trigger.is_match(query) || self.element_triggers.is_match(&query.to_lowercase())
    }

    /// The element the question is about, if one can be resolved.
    ///
    /// Candidates from the extraction templates are only accepted when they
    /// name a known element or symbol.
    pub fn extract_element(&self, query: &str) -> Option<&'static ElementRecord> {
        let lower = query.to_lowercase();
        if let Some(element) = self.extractors.first(&lower) {
            return Some(element);
        }

        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        COMMON_ELEMENTS
            .iter()
            .find(|name| words.contains(*name))
            .and_then(|name| self.table.by_name(name))
    }

    pub fn detect_element(&self, query: &str) -> Outcome<&'static ElementRecord> {
        if !self.needs_periodic_table(query) {
            return Outcome::Skipped;
        }
        match self.extract_element(query) {
            Some(element) => Outcome::Hit(element),
            None => Outcome::Miss,
        }
    }

    /// Whether the question asks for a stoichiometry-style calculation.
    pub fn needs_calculation(&self, query: &str) -> bool {
        self.calculation_triggers.is_match(&query.to_lowercase())
    }
}

impl Default for ChemistryDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol_of(outcome: Outcome<&'static ElementRecord>) -> Option<&'static str> {
        outcome.hit().map(|e| e.symbol)
    }

    #[test]
    fn test_atomic_property_questions() {
        let d = ChemistryDetector::new();
        assert_eq!(symbol_of(d.detect_element("What is the atomic number of carbon?")), Some("C"));
        assert_eq!(
            symbol_of(d.detect_element("Give me the electron configuration of the element sodium")),
            Some("Na")
        );
        assert_eq!(symbol_of(d.detect_element("Tell me about gold")), Some("Au"));
    }

    #[test]
    fn test_symbol_phrasing() {
        let d = ChemistryDetector::new();
        assert!(d.needs_periodic_table("How many protons are in an Fe atom?"));
        assert_eq!(
            symbol_of(d.detect_element("How many protons are in an Fe atom?")),
            Some("Fe")
        );
    }

    #[test]
    fn test_common_name_fallback_uses_whole_words() {
        let d = ChemistryDetector::new();
        assert_eq!(
            symbol_of(d.detect_element("Why does iron rust faster than zinc?")),
            Some("Fe")
        );
        // "environment" must not be read as iron.
        assert_eq!(
            d.extract_element("what element has the most impact on the environment"),
            None
        );
    }

    #[test]
    fn test_trigger_without_element_is_miss() {
        let d = ChemistryDetector::new();
        assert_eq!(d.detect_element("Which group is the most reactive?"), Outcome::Miss);
        assert_eq!(d.detect_element("What is a covalent bond?"), Outcome::Skipped);
    }

    #[test]
    fn test_needs_calculation() {
        let d = ChemistryDetector::new();
        assert!(d.needs_calculation("What is the molar mass of water?"));
        assert!(d.needs_calculation("Find the limiting reagent"));
        assert!(!d.needs_calculation("What is an ionic bond?"));
    }
}
