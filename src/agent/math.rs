//! Mathematics agent.

use super::{answer_or_apology, Agent, AgentResponse, ToolsUsed};
use crate::config::Prompts;
use crate::detect::{MathDetector, Outcome};
use crate::llm::TextGenerator;
use crate::tools::{names, CalculationResult, Calculator};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Answers math questions, running the calculator when the question contains
/// something to evaluate.
pub struct MathAgent {
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<Prompts>,
    detector: MathDetector,
    calculator: Calculator,
}

impl MathAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Arc<Prompts>) -> Self {
        Self {
            generator,
            prompts,
            detector: MathDetector::new(),
            calculator: Calculator::new(),
        }
    }

    /// Detect, extract and evaluate.
    pub fn calculate(&self, query: &str) -> Outcome<CalculationResult> {
        self.detector.detect(query).and_then(|expression| {
            let result = self.calculator.evaluate(&expression);
            if result.success {
                Outcome::Hit(result)
            } else {
                Outcome::Failed(result.error.unwrap_or_default())
            }
        })
    }

    /// Prompt for `query`, along with the tools that fed it.
    fn build_prompt(&self, query: &str) -> (String, ToolsUsed) {
        let mut tools = ToolsUsed::default();

        let calculation = match self.calculate(query) {
            Outcome::Hit(result) => {
                tools.record(names::CALCULATOR);
                format!("I used a calculator tool and got this result: {}", result)
            }
            other => {
                debug!("Calculator {}", other.label());
                String::new()
            }
        };

        let prompt = self
            .prompts
            .builder(&self.prompts.math.template)
            .slot("question", query)
            .slot("calculation", calculation)
            .build();

        (prompt, tools)
    }
}

#[async_trait]
impl Agent for MathAgent {
    fn name(&self) -> &'static str {
        "Math Agent"
    }

    #[instrument(skip(self))]
    async fn handle_query(&self, query: &str) -> AgentResponse {
        let (prompt, tools) = self.build_prompt(query);
        let answer =
            answer_or_apology(self.generator.as_ref(), &prompt, "solving your math problem").await;

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

    fn agent() -> (Arc<MockGenerator>, MathAgent) {
        let generator = Arc::new(MockGenerator::with_fallback("Four."));
        let agent = MathAgent::new(generator.clone(), Arc::new(Prompts::default()));
        (generator, agent)
    }

    #[tokio::test]
    async fn test_calculator_result_in_prompt() {
        let (generator, agent) = agent();
        let response = agent.handle_query("What is 2 + 2?").await;

        assert_eq!(response.answer, "Four.");
        assert_eq!(response.tools_used, vec!["Calculator"]);
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("What is 2 + 2?"));
        assert!(prompt.contains("got this result: 2 + 2 = 4"));
    }

    #[tokio::test]
    async fn test_failed_evaluation_is_omitted() {
        let (generator, agent) = agent();
        let response = agent.handle_query("What is 10 / 0?").await;

        assert!(response.tools_used.is_empty());
        assert!(!generator.prompts()[0].contains("calculator tool"));
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn test_factorial_question_is_evaluated() {
        let (_, agent) = agent();
        match agent.calculate("What is 5!") {
            Outcome::Hit(result) => {
                assert_eq!(result.result, Some(120.0));
                assert_eq!(result.expression, "factorial(5)");
            }
            other => panic!("expected a calculation, got {:?}", other),
        }
    }

    #[test]
    fn test_runaway_expression_fails_cleanly() {
        let (_, agent) = agent();
        let query = format!("calculate 1 plus {}1", "-".repeat(200_000));
        match agent.calculate(&query) {
            Outcome::Failed(reason) => assert!(reason.contains("too long")),
            other => panic!("expected a failure, got {:?}", other.label()),
        }
    }

    #[tokio::test]
    async fn test_conceptual_question_skips_calculator() {
        let (_, agent) = agent();
        assert_eq!(agent.calculate("What is a prime number?"), Outcome::Skipped);
        let response = agent.handle_query("What is a prime number?").await;
        assert!(response.tools_used.is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_becomes_apology() {
        let (generator, agent) = agent();
        generator.push_error("rate limited");

        let response = agent.handle_query("What is 3 * 4?").await;
        assert!(response
            .answer
            .starts_with("I'm sorry, I encountered an error while solving your math problem"));
        assert_eq!(response.tools_used, vec!["Calculator"]);
    }
}
