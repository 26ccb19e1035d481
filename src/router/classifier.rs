//! Two-stage question classifier: keyword scoring, then the model.

use super::keywords::KeywordRegistry;
use super::Category;
use crate::config::Prompts;
use crate::llm::TextGenerator;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Classifies questions into a [`Category`].
///
/// Classification never fails: an unusable model reply or a failed model call
/// both degrade to [`Category::General`].
pub struct Classifier {
    registry: KeywordRegistry,
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<Prompts>,
}

impl Classifier {
    pub fn new(
        registry: KeywordRegistry,
        generator: Arc<dyn TextGenerator>,
        prompts: Arc<Prompts>,
    ) -> Self {
        Self {
            registry,
            generator,
            prompts,
        }
    }

    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    #[instrument(skip(self))]
    pub async fn classify(&self, query: &str) -> Category {
        if let Some(category) = self.registry.best(query) {
            debug!("Keyword classification: {}", category);
            return category;
        }
        self.classify_with_model(query).await
    }

    /// Ask the model for exactly one category token.
    pub async fn classify_with_model(&self, query: &str) -> Category {
        let prompt = self
            .prompts
            .builder(&self.prompts.classifier.template)
            .slot("question", query)
            .build();

        match self.generator.generate(&prompt).await {
            Ok(reply) => {
                let token = reply.trim().to_lowercase();
                match Category::from_token(&token) {
                    Some(category) => {
                        debug!("Model classification: {}", category);
                        category
                    }
                    None => {
                        warn!("Unrecognized classification '{}', using general", token);
                        Category::General
                    }
                }
            }
            Err(e) => {
                warn!("Classification failed, using general: {}", e);
                Category::General
            }
        }
    }
}
