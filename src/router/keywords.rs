//! Keyword registry for the first classification pass.

use super::Category;

const MATH_KEYWORDS: &[&str] = &[
    "calculate",
    "solve",
    "equation",
    "math",
    "mathematics",
    "algebra",
    "geometry",
    "arithmetic",
    "number",
    "add",
    "subtract",
    "multiply",
    "divide",
    "sum",
    "product",
    "percent",
    "square root",
    "fraction",
    "integral",
    "derivative",
    "calculus",
    "trigonometry",
    "probability",
    "statistics",
];

const PHYSICS_KEYWORDS: &[&str] = &[
    "physics",
    "force",
    "velocity",
    "acceleration",
    "newton",
    "gravity",
    "mass",
    "energy",
    "momentum",
    "friction",
    "motion",
    "speed",
    "constant",
    "law",
    "quantum",
    "electric",
    "magnetic",
    "wave",
    "light",
    "gravitational",
    "relativity",
    "kinetic",
    "potential energy",
    "thermodynamics",
    "convert",
];

const CHEMISTRY_KEYWORDS: &[&str] = &[
    "chemistry",
    "chemical",
    "element",
    "atom",
    "atomic",
    "molecule",
    "molecular",
    "compound",
    "reaction",
    "periodic table",
    "bond",
    "acid",
    "electron configuration",
    "molar",
    "molar mass",
    "moles",
    "oxidation",
    "isotope",
    "valence",
    "stoichiometry",
    "ionic",
    "covalent",
];

/// Keyword list for one subject.
#[derive(Debug, Clone)]
pub struct DomainKeywords {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl DomainKeywords {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Number of distinct keywords present in the already lowercased query.
    fn score(&self, lowered: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .count()
    }
}

/// The subjects known to the keyword pass, in registration order.
#[derive(Debug, Clone)]
pub struct KeywordRegistry {
    domains: Vec<DomainKeywords>,
}

impl KeywordRegistry {
    pub fn empty() -> Self {
        Self {
            domains: Vec::new(),
        }
    }

    /// Register a subject, replacing any earlier list for the same category.
    pub fn register(mut self, domain: DomainKeywords) -> Self {
        self.domains.retain(|d| d.category != domain.category);
        self.domains.push(domain);
        self
    }

    pub fn domains(&self) -> &[DomainKeywords] {
        &self.domains
    }

    /// Presence count per registered subject.
    pub fn scores(&self, query: &str) -> Vec<(Category, usize)> {
        let lowered = query.to_lowercase();
        self.domains
            .iter()
            .map(|d| (d.category, d.score(&lowered)))
            .collect()
    }

    /// The subject whose score is non-zero and strictly above every other.
    ///
    /// Ties, including all-zero, yield `None`.
    pub fn best(&self, query: &str) -> Option<Category> {
        let scores = self.scores(query);
        let (category, top) = scores.iter().copied().max_by_key(|(_, score)| *score)?;
        if top == 0 {
            return None;
        }
        let unique = scores.iter().filter(|(_, score)| *score == top).count() == 1;
        unique.then_some(category)
    }
}

impl Default for KeywordRegistry {
    fn default() -> Self {
        Self::empty()
            .register(DomainKeywords::new(Category::Math, MATH_KEYWORDS))
            .register(DomainKeywords::new(Category::Physics, PHYSICS_KEYWORDS))
            .register(DomainKeywords::new(Category::Chemistry, CHEMISTRY_KEYWORDS))
    }
}
