//! Subject agents.
//!
//! Each agent runs a fixed pipeline for one subject: its detectors decide
//! which deterministic tools to run, the tool outputs fill the agent's prompt
//! template, and the assembled prompt goes to the text generator exactly once.
//! Augmentations that miss or fail are left out silently; a failed generation
//! becomes an apologetic answer rather than an error.

mod chemistry;
mod general;
mod math;
mod physics;

pub use chemistry::ChemistryAgent;
pub use general::TutorAgent;
pub use math::MathAgent;
pub use physics::PhysicsAgent;

use crate::llm::TextGenerator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

/// An agent's answer plus the tools that contributed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub answer: String,
    /// Tools whose extraction and execution both succeeded, in detection order.
    pub tools_used: Vec<String>,
}

/// A subject specialist.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Display name reported as `agent_used`.
    fn name(&self) -> &'static str;

    /// Answer a question. Never fails; generation errors become the answer text.
    async fn handle_query(&self, query: &str) -> AgentResponse;
}

/// Ordered tool names without duplicates.
#[derive(Debug, Default)]
pub(crate) struct ToolsUsed(Vec<String>);

impl ToolsUsed {
    pub(crate) fn record(&mut self, name: &str) {
        if !self.0.iter().any(|n| n == name) {
            self.0.push(name.to_string());
        }
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Run the single generation call for an agent.
///
/// `activity` completes the sentence "I encountered an error while ...".
pub(crate) async fn answer_or_apology(
    generator: &dyn TextGenerator,
    prompt: &str,
    activity: &str,
) -> String {
    match generator.generate(prompt).await {
        Ok(answer) => answer,
        Err(e) => {
            error!("Generation failed while {}: {}", activity, e);
            format!("I'm sorry, I encountered an error while {}: {}", activity, e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;

    #[test]
    fn test_tools_used_deduplicates_in_order() {
        let mut tools = ToolsUsed::default();
        tools.record("Unit Converter");
        tools.record("Physics Constants");
        tools.record("Unit Converter");
        assert_eq!(tools.into_vec(), vec!["Unit Converter", "Physics Constants"]);
    }

    #[tokio::test]
    async fn test_apology_on_generation_failure() {
        let generator = MockGenerator::new();
        generator.push_error("quota exceeded");

        let answer = answer_or_apology(&generator, "prompt", "processing your question").await;
        assert!(answer.starts_with("I'm sorry, I encountered an error while processing your question:"));
        assert!(answer.contains("quota exceeded"));
    }
}
