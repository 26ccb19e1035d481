//! Chemistry agent.

use super::{answer_or_apology, Agent, AgentResponse, ToolsUsed};
use crate::config::Prompts;
use crate::detect::chemistry::CALCULATION_NOTE;
use crate::detect::{ChemistryDetector, Outcome};
use crate::llm::TextGenerator;
use crate::tools::{names, ElementRecord, PeriodicTable};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Answers chemistry questions, adding periodic-table data when the question
/// is about a specific element.
///
/// Stoichiometry-style questions are recognised but only flagged with an
/// informational note; no chemical calculation is performed.
pub struct ChemistryAgent {
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<Prompts>,
    detector: ChemistryDetector,
    table: PeriodicTable,
}

impl ChemistryAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Arc<Prompts>) -> Self {
        Self {
            generator,
            prompts,
            detector: ChemistryDetector::new(),
            table: PeriodicTable::new(),
        }
    }

    pub fn find_element(&self, query: &str) -> Outcome<&'static ElementRecord> {
        self.detector.detect_element(query)
    }

    fn build_prompt(&self, query: &str) -> (String, ToolsUsed) {
        let mut tools = ToolsUsed::default();

        let element_info = match self.find_element(query) {
            Outcome::Hit(element) => {
                tools.record(names::PERIODIC_TABLE);
                format!("Element Information:\n{}", self.table.format_info(element))
            }
            other => {
                debug!("Periodic table {}", other.label());
                String::new()
            }
        };

        let calculation_note = if self.detector.needs_calculation(query) {
            CALCULATION_NOTE
        } else {
            ""
        };

        let prompt = self
            .prompts
            .builder(&self.prompts.chemistry.template)
            .slot("question", query)
            .slot("element_info", element_info)
            .slot("calculation_note", calculation_note)
            .build();

        (prompt, tools)
    }
}

#[async_trait]
impl Agent for ChemistryAgent {
    fn name(&self) -> &'static str {
        "Chemistry Agent"
    }

    #[instrument(skip(self))]
    async fn handle_query(&self, query: &str) -> AgentResponse {
        let (prompt, tools) = self.build_prompt(query);
        let answer = answer_or_apology(
            self.generator.as_ref(),
            &prompt,
            "answering your chemistry question",
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

    fn agent() -> (Arc<MockGenerator>, ChemistryAgent) {
        let generator = Arc::new(MockGenerator::new());
        let agent = ChemistryAgent::new(generator.clone(), Arc::new(Prompts::default()));
        (generator, agent)
    }

    #[tokio::test]
    async fn test_element_lookup() {
        let (generator, agent) = agent();
        let response = agent
            .handle_query("What is the atomic number of carbon?")
            .await;

        assert_eq!(response.tools_used, vec!["Periodic Table"]);
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Element Information:"));
        assert!(prompt.contains("Atomic Number: 6"));
    }

    #[tokio::test]
    async fn test_calculation_note_is_not_a_tool() {
        let (generator, agent) = agent();
        let response = agent.handle_query("What is the molar mass of water?").await;

        assert!(response.tools_used.is_empty());
        assert!(generator.prompts()[0].contains("Chemical calculations will be provided."));
    }

    #[tokio::test]
    async fn test_unresolved_element_is_omitted() {
        let (generator, agent) = agent();
        let response = agent.handle_query("Which group is the most reactive?").await;

        assert!(response.tools_used.is_empty());
        assert!(!generator.prompts()[0].contains("Element Information:"));
    }

    #[tokio::test]
    async fn test_generation_failure_becomes_apology() {
        let (generator, agent) = agent();
        generator.push_error("unavailable");

        let response = agent.handle_query("Tell me about gold").await;
        assert!(response
            .answer
            .starts_with("I'm sorry, I encountered an error while answering your chemistry question"));
        assert_eq!(response.tools_used, vec!["Periodic Table"]);
    }
}
