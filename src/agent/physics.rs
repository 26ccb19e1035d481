//! Physics agent.

use super::{answer_or_apology, Agent, AgentResponse, ToolsUsed};
use crate::config::Prompts;
use crate::detect::{Outcome, PhysicsDetector};
use crate::llm::TextGenerator;
use crate::tools::{
    names, ConstantRecord, ConstantsTable, Conversion, FormulaCatalog, FormulaRecord,
    UnitConverter,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Answers physics questions with constants, unit conversions and formulas
/// pulled in as needed. The three detectors fire independently.
pub struct PhysicsAgent {
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<Prompts>,
    detector: PhysicsDetector,
    constants: ConstantsTable,
    converter: UnitConverter,
    formulas: FormulaCatalog,
}

impl PhysicsAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Arc<Prompts>) -> Self {
        Self {
            generator,
            prompts,
            detector: PhysicsDetector::new(),
            constants: ConstantsTable::new(),
            converter: UnitConverter::new(),
            formulas: FormulaCatalog::new(),
        }
    }

    pub fn find_constants(&self, query: &str) -> Outcome<Vec<&'static ConstantRecord>> {
        self.detector.detect_constants(query)
    }

    pub fn convert_units(&self, query: &str) -> Outcome<Conversion> {
        self.detector.detect_conversion(query).and_then(|request| {
            match self
                .converter
                .conversion(request.value, &request.from, &request.to)
            {
                Some(conversion) => Outcome::Hit(conversion),
                None => Outcome::Failed(format!(
                    "no conversion from '{}' to '{}'",
                    request.from, request.to
                )),
            }
        })
    }

    pub fn find_formulas(&self, query: &str) -> Outcome<Vec<&'static FormulaRecord>> {
        self.detector.detect_formula(query).and_then(|terms| {
            let found = self.formulas.search(&terms);
            if found.is_empty() {
                Outcome::Failed(format!("no formula matches '{}'", terms))
            } else {
                Outcome::Hit(found)
            }
        })
    }

    fn build_prompt(&self, query: &str) -> (String, ToolsUsed) {
        let mut tools = ToolsUsed::default();

        let constants = match self.find_constants(query) {
            Outcome::Hit(found) => {
                tools.record(names::PHYSICS_CONSTANTS);
                let lines: Vec<String> = found
                    .iter()
                    .map(|c| format!("- {}", self.constants.format(c)))
                    .collect();
                format!("Here are the relevant physics constants:\n{}", lines.join("\n"))
            }
            other => {
                debug!("Constants {}", other.label());
                String::new()
            }
        };

        let conversion = match self.convert_units(query) {
            Outcome::Hit(conversion) => {
                tools.record(names::UNIT_CONVERTER);
                format!("Unit conversion: {}", conversion)
            }
            other => {
                debug!("Conversion {}", other.label());
                String::new()
            }
        };

        let formulas = match self.find_formulas(query) {
            Outcome::Hit(found) => {
                tools.record(names::FORMULA_SEARCH);
                let lines: Vec<String> = found
                    .iter()
                    .map(|f| format!("- {}", self.formulas.format(f)))
                    .collect();
                format!("Relevant formulas:\n{}", lines.join("\n"))
            }
            other => {
                debug!("Formula search {}", other.label());
                String::new()
            }
        };

        let prompt = self
            .prompts
            .builder(&self.prompts.physics.template)
            .slot("question", query)
            .slot("constants", constants)
            .slot("conversion", conversion)
            .slot("formulas", formulas)
            .build();

        (prompt, tools)
    }
}

#[async_trait]
impl Agent for PhysicsAgent {
    fn name(&self) -> &'static str {
        "Physics Agent"
    }

    #[instrument(skip(self))]
    async fn handle_query(&self, query: &str) -> AgentResponse {
        let (prompt, tools) = self.build_prompt(query);
        let answer = answer_or_apology(
            self.generator.as_ref(),
            &prompt,
            "answering your physics question",
        )
        .await;

        AgentResponse {
            answer,
            tools_used: tools.into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;

    fn agent() -> (Arc<MockGenerator>, PhysicsAgent) {
        let generator = Arc::new(MockGenerator::new());
        let agent = PhysicsAgent::new(generator.clone(), Arc::new(Prompts::default()));
        (generator, agent)
    }

    #[tokio::test]
    async fn test_constant_lookup() {
        let (generator, agent) = agent();
        let response = agent.handle_query("What is the speed of light?").await;

        assert_eq!(response.tools_used, vec!["Physics Constants"]);
        assert!(generator.prompts()[0].contains("Speed of Light (c): 299792458 m/s"));
    }

    #[tokio::test]
    async fn test_conversion() {
        let (generator, agent) = agent();
        let response = agent.handle_query("Convert 100 km to m").await;

        assert_eq!(response.tools_used, vec!["Unit Converter"]);
        assert!(generator.prompts()[0].contains("Unit conversion: 100 km = 100000 m"));
    }

    #[tokio::test]
    async fn test_unsupported_pair_is_omitted() {
        let (generator, agent) = agent();
        let response = agent.handle_query("Convert 5 lightyears to m").await;

        assert!(response.tools_used.is_empty());
        assert!(!generator.prompts()[0].contains("Unit conversion:"));
    }

    #[tokio::test]
    async fn test_detectors_fire_independently() {
        let (generator, agent) = agent();
        let response = agent
            .handle_query("Using the gravitational constant, what is the gravitational force formula?")
            .await;

        assert_eq!(response.tools_used, vec!["Physics Constants", "Formula Search"]);
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Gravitational Constant (G)"));
        assert!(prompt.contains("Universal law of gravitation"));
    }

    #[tokio::test]
    async fn test_blank_slots_keep_template() {
        let (generator, agent) = agent();
        let response = agent.handle_query("Why is the sky blue?").await;

        assert!(response.tools_used.is_empty());
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("A student asked: \"Why is the sky blue?\""));
        assert!(prompt.contains("Please provide a comprehensive response"));
    }

    #[tokio::test]
    async fn test_generation_failure_becomes_apology() {
        let (generator, agent) = agent();
        generator.push_error("timeout");

        let response = agent.handle_query("What is momentum?").await;
        assert!(response
            .answer
            .starts_with("I'm sorry, I encountered an error while answering your physics question"));
    }
}
