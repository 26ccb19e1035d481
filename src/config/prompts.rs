//! Prompt templates for the tutor agents.
//!
//! Each agent owns a single template with named `{{slot}}` placeholders.
//! Templates can be customized by placing TOML files in the custom prompts
//! directory (`classifier.toml`, `math.toml`, `physics.toml`,
//! `chemistry.toml`, `general.toml`), each containing a `template` key.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static SLOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub classifier: ClassifierPrompt,
    pub math: MathPrompt,
    pub physics: PhysicsPrompt,
    pub chemistry: ChemistryPrompt,
    pub general: GeneralPrompt,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompt for the model-based classification fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierPrompt {
    pub template: String,
}

impl Default for ClassifierPrompt {
    fn default() -> Self {
        Self {
            template: r#"Classify this student question into one of these categories: math, physics, chemistry, or general.

Question: "{{question}}"

Guidelines:
- Math: arithmetic, algebra, geometry, calculations, equations
- Physics: forces, motion, energy, constants, physical laws, units
- Chemistry: elements, atoms, molecules, reactions, the periodic table
- General: anything else

Respond with only one word: math, physics, chemistry, or general"#
                .to_string(),
        }
    }
}

/// Prompt for the math agent. Slots: `question`, `calculation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MathPrompt {
    pub template: String,
}

impl Default for MathPrompt {
    fn default() -> Self {
        Self {
            template: r#"You are a mathematics tutor. A student asked: "{{question}}"

{{calculation}}

Please provide a complete response that:
1. Shows the calculation step-by-step if applicable
2. Explains the mathematical concept involved
3. Uses the calculator result above when one is given
4. Includes the final answer
5. Is educational and clear for a student

Make your response conversational and helpful."#
                .to_string(),
        }
    }
}

/// Prompt for the physics agent. Slots: `question`, `constants`,
/// `conversion`, `formulas`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsPrompt {
    pub template: String,
}

impl Default for PhysicsPrompt {
    fn default() -> Self {
        Self {
            template: r#"You are a physics tutor. A student asked: "{{question}}"

{{constants}}
{{conversion}}
{{formulas}}

Please provide a comprehensive response that:
1. Explains the physics concept clearly
2. Uses the relevant constants, conversions and formulas above if provided
3. Shows step-by-step solutions if it's a problem
4. Provides educational context and real-world applications
5. Is clear and appropriate for a student learning physics

Make your response engaging and educational."#
                .to_string(),
        }
    }
}

/// Prompt for the chemistry agent. Slots: `question`, `element_info`,
/// `calculation_note`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemistryPrompt {
    pub template: String,
}

impl Default for ChemistryPrompt {
    fn default() -> Self {
        Self {
            template: r#"You are a chemistry tutor. A student asked: "{{question}}"

{{element_info}}
{{calculation_note}}

Provide a response that:
1. Explains the chemistry concept clearly
2. Uses the provided element information if relevant
3. Shows chemical equations and calculations if needed
4. Includes molecular structures or diagrams when helpful
5. Is educational and engaging"#
                .to_string(),
        }
    }
}

/// Prompt for the general tutor. Slot: `question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralPrompt {
    pub template: String,
}

impl Default for GeneralPrompt {
    fn default() -> Self {
        Self {
            template: r#"You are a helpful AI tutor assistant. Answer this student's question clearly and educationally.

Student Question: {{question}}

Provide a clear, helpful response that would be appropriate for a student."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&Path>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            if let Some(p) = load_override(dir, "classifier.toml")? {
                prompts.classifier = p;
            }
            if let Some(p) = load_override(dir, "math.toml")? {
                prompts.math = p;
            }
            if let Some(p) = load_override(dir, "physics.toml")? {
                prompts.physics = p;
            }
            if let Some(p) = load_override(dir, "chemistry.toml")? {
                prompts.chemistry = p;
            }
            if let Some(p) = load_override(dir, "general.toml")? {
                prompts.general = p;
            }
        }

        Ok(prompts)
    }

    /// Start a builder for `template`, pre-seeded with the custom config variables.
    pub fn builder<'a>(&self, template: &'a str) -> PromptBuilder<'a> {
        PromptBuilder::new(template).variables(&self.variables)
    }
}

fn load_override<T: for<'de> Deserialize<'de>>(
    dir: &Path,
    file: &str,
) -> crate::error::Result<Option<T>> {
    let path = dir.join(file);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Fills a template's `{{slot}}` placeholders.
///
/// Slots without a value render as empty strings, so a template's layout
/// never changes with the tool outputs available. Values set with
/// [`PromptBuilder::slot`] take precedence over custom variables.
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    template: &'a str,
    values: HashMap<String, String>,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            values: HashMap::new(),
        }
    }

    /// Add custom variables without overriding slots already set.
    pub fn variables(mut self, vars: &HashMap<String, String>) -> Self {
        for (key, value) in vars {
            self.values
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    pub fn slot(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn build(&self) -> String {
        SLOT_PATTERN
            .replace_all(self.template, |caps: &regex::Captures<'_>| {
                self.values.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.math.template.contains("{{calculation}}"));
        assert!(prompts.physics.template.contains("{{formulas}}"));
        assert!(prompts.chemistry.template.contains("{{element_info}}"));
        assert!(prompts.classifier.template.contains("chemistry"));
    }

    #[test]
    fn test_render_template() {
        let prompt = PromptBuilder::new("Hello {{name}}, you have {{count}} messages.")
            .slot("name", "Alice")
            .slot("count", "5")
            .build();
        assert_eq!(prompt, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_empty_slot_leaves_blank_line() {
        let prompt = PromptBuilder::new("Q: {{question}}\n\n{{calculation}}\n\nAnswer it.")
            .slot("question", "2+2?")
            .build();
        assert_eq!(prompt, "Q: 2+2?\n\n\n\nAnswer it.");
    }

    #[test]
    fn test_slot_overrides_custom_variable() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "ignored".to_string());
        vars.insert("level".to_string(), "beginner".to_string());

        let prompt = PromptBuilder::new("{{question}} ({{level}})")
            .slot("question", "What is a mole?")
            .variables(&vars)
            .build();
        assert_eq!(prompt, "What is a mole? (beginner)");
    }

    #[test]
    fn test_load_custom_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("general.toml"),
            "template = \"Be brief: {{question}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(Some(dir.path()), None).unwrap();
        assert_eq!(prompts.general.template, "Be brief: {{question}}");
        assert_eq!(prompts.math.template, MathPrompt::default().template);
    }
}
