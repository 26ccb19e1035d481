//! General tutor for questions outside the subject agents.

use super::{answer_or_apology, Agent, AgentResponse};
use crate::config::Prompts;
use crate::llm::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Answers anything no subject agent claims. Uses no tools.
pub struct TutorAgent {
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<Prompts>,
}

impl TutorAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Arc<Prompts>) -> Self {
        Self { generator, prompts }
    }
}

#[async_trait]
impl Agent for TutorAgent {
    fn name(&self) -> &'static str {
        "Tutor Agent"
    }

    #[instrument(skip(self))]
    async fn handle_query(&self, query: &str) -> AgentResponse {
        let prompt = self
            .prompts
            .builder(&self.prompts.general.template)
            .slot("question", query)
            .build();
        let answer =
            answer_or_apology(self.generator.as_ref(), &prompt, "processing your question").await;

        AgentResponse {
            answer,
            tools_used: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_prompt_uses_custom_variables() {
        let generator = Arc::new(MockGenerator::with_fallback("Shakespeare."));
        let mut prompts = Prompts::default();
        prompts.general.template = "{{persona}}: {{question}}".to_string();
        let vars = HashMap::from([("persona".to_string(), "Friendly tutor".to_string())]);
        let prompts = Prompts {
            variables: vars,
            ..prompts
        };

        let agent = TutorAgent::new(generator.clone(), Arc::new(prompts));
        let response = agent.handle_query("Who wrote Hamlet?").await;

        assert_eq!(response.answer, "Shakespeare.");
        assert!(response.tools_used.is_empty());
        assert_eq!(generator.prompts(), vec!["Friendly tutor: Who wrote Hamlet?"]);
    }
}
