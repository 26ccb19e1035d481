//! Question routing.
//!
//! The [`Router`] classifies a question, hands it to the matching subject
//! agent (or the general tutor) and reports which agent answered and which
//! tools it used.

mod classifier;
mod keywords;

pub use classifier::Classifier;
pub use keywords::{DomainKeywords, KeywordRegistry};

use crate::agent::{Agent, ChemistryAgent, MathAgent, PhysicsAgent, TutorAgent};
use crate::config::{Prompts, Settings};
use crate::error::{Result, TutorError};
use crate::llm::{OpenAIGenerator, TextGenerator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

/// Question category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Math,
    Physics,
    Chemistry,
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Math,
        Category::Physics,
        Category::Chemistry,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Math => "math",
            Category::Physics => "physics",
            Category::Chemistry => "chemistry",
            Category::General => "general",
        }
    }

    /// Exact, already normalized token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == token)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer to a routed question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterResult {
    pub answer: String,
    pub agent_used: String,
    pub tools_used: Vec<String>,
    pub query_category: Category,
}

/// Dispatches questions to subject agents.
pub struct Router {
    classifier: Classifier,
    agents: HashMap<Category, Arc<dyn Agent>>,
    fallback: Arc<dyn Agent>,
}

impl Router {
    /// Router with the built-in agents and keyword lists.
    ///
    /// `generator` answers questions; `classifier` is only used for the model
    /// classification fallback.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        classifier: Arc<dyn TextGenerator>,
        prompts: Arc<Prompts>,
    ) -> Self {
        let fallback: Arc<dyn Agent> = Arc::new(TutorAgent::new(generator.clone(), prompts.clone()));

        let mut router = Self {
            classifier: Classifier::new(KeywordRegistry::default(), classifier, prompts.clone()),
            agents: HashMap::new(),
            fallback: fallback.clone(),
        };
        router.register(
            Category::Math,
            Arc::new(MathAgent::new(generator.clone(), prompts.clone())),
        );
        router.register(
            Category::Physics,
            Arc::new(PhysicsAgent::new(generator.clone(), prompts.clone())),
        );
        router.register(
            Category::Chemistry,
            Arc::new(ChemistryAgent::new(generator, prompts)),
        );
        router.register(Category::General, fallback);
        router
    }

    /// Build the OpenAI-backed router from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts_dir = settings.prompts_dir();
        let prompts = Prompts::load(prompts_dir.as_deref(), Some(&settings.prompts.variables))?;

        let generator = Arc::new(OpenAIGenerator::new(&settings.llm)?);
        let classifier = Arc::new(OpenAIGenerator::classifier(&settings.llm)?);
        info!(
            "Router ready (model: {}, classifier: {})",
            generator.model(),
            classifier.model()
        );

        Ok(Self::new(generator, classifier, Arc::new(prompts)))
    }

    /// Register or replace the agent for a category.
    pub fn register(&mut self, category: Category, agent: Arc<dyn Agent>) {
        self.agents.insert(category, agent);
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub async fn classify(&self, query: &str) -> Category {
        self.classifier.classify(query).await
    }

    /// Classify, delegate and report provenance.
    #[instrument(skip(self))]
    pub async fn route(&self, query: &str) -> RouterResult {
        let category = self.classify(query).await;
        let agent = self.agents.get(&category).unwrap_or(&self.fallback);

        info!("Routing {} question to {}", category, agent.name());
        let response = agent.handle_query(query).await;

        RouterResult {
            answer: response.answer,
            agent_used: agent.name().to_string(),
            tools_used: response.tools_used,
            query_category: category,
        }
    }
}

/// Trim a question, rejecting blank input.
pub fn validate_question(question: &str) -> Result<&str> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(TutorError::InvalidInput(
            "Question must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;

    #[test]
    fn test_validate_question() {
        assert_eq!(validate_question("  What is 2 + 2? \n").unwrap(), "What is 2 + 2?");

        let err = validate_question(" \t ").unwrap_err();
        assert!(matches!(err, TutorError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid input: Question must not be empty");
    }

    fn router() -> (Arc<MockGenerator>, Arc<MockGenerator>, Router) {
        let generator = Arc::new(MockGenerator::with_fallback("answer"));
        let classifier = Arc::new(MockGenerator::with_fallback("general"));
        let router = Router::new(
            generator.clone(),
            classifier.clone(),
            Arc::new(Prompts::default()),
        );
        (generator, classifier, router)
    }

    #[test]
    fn test_category_tokens() {
        assert_eq!(Category::from_token("physics"), Some(Category::Physics));
        assert_eq!(Category::from_token("Physics"), None);
        assert_eq!(Category::Chemistry.to_string(), "chemistry");
        assert_eq!(
            serde_json::to_string(&Category::General).unwrap(),
            "\"general\""
        );
    }

    #[tokio::test]
    async fn test_route_math_with_calculator() {
        let (generator, classifier, router) = router();
        let result = router.route("Calculate 12 times 3").await;

        assert_eq!(result.agent_used, "Math Agent");
        assert_eq!(result.query_category, Category::Math);
        assert_eq!(result.tools_used, vec!["Calculator"]);
        assert_eq!(result.answer, "answer");
        assert_eq!(classifier.call_count(), 0);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_route_physics_conversion() {
        let (_, _, router) = router();
        let result = router.route("Convert 100 km to m").await;

        assert_eq!(result.agent_used, "Physics Agent");
        assert_eq!(result.tools_used, vec!["Unit Converter"]);
    }

    #[tokio::test]
    async fn test_route_chemistry_element() {
        let (_, _, router) = router();
        let result = router.route("What is the atomic number of carbon?").await;

        assert_eq!(result.agent_used, "Chemistry Agent");
        assert_eq!(result.query_category, Category::Chemistry);
        assert_eq!(result.tools_used, vec!["Periodic Table"]);
    }

    #[tokio::test]
    async fn test_model_fallback_routes_to_agent() {
        let (_, classifier, router) = router();
        classifier.push_text("math");

        let result = router.route("What is 2 + 2?").await;
        assert_eq!(result.agent_used, "Math Agent");
        assert_eq!(result.tools_used, vec!["Calculator"]);
        assert_eq!(classifier.call_count(), 1);
    }

    #[tokio::test]
    async fn test_general_questions_go_to_tutor() {
        let (_, classifier, router) = router();
        classifier.push_error("quota exceeded");

        let result = router.route("Who wrote Hamlet?").await;
        assert_eq!(result.agent_used, "Tutor Agent");
        assert_eq!(result.query_category, Category::General);
        assert!(result.tools_used.is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_still_well_formed() {
        let (generator, _, router) = router();
        generator.push_error("service unavailable");

        let result = router.route("What is the speed of light?").await;
        assert_eq!(result.agent_used, "Physics Agent");
        assert!(result.answer.starts_with("I'm sorry"));
        assert_eq!(result.tools_used, vec!["Physics Constants"]);
    }

    #[test]
    fn test_result_json_shape() {
        let result = RouterResult {
            answer: "4".to_string(),
            agent_used: "Math Agent".to_string(),
            tools_used: vec!["Calculator".to_string()],
            query_category: Category::Math,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["query_category"], "math");
        assert_eq!(value["tools_used"][0], "Calculator");
    }
}
