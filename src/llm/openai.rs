//! OpenAI chat-completions implementation.

use super::TextGenerator;
use crate::config::LlmSettings;
use crate::error::{Result, TutorError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Generator backed by an OpenAI-compatible chat endpoint.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIGenerator {
    /// Create a generator for answering questions.
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        Self::with_model(settings, &settings.model, settings.temperature)
    }

    /// Create a generator for the classification fallback.
    pub fn classifier(settings: &LlmSettings) -> Result<Self> {
        Self::with_model(
            settings,
            settings.classifier_model(),
            settings.classifier_temperature,
        )
    }

    /// Create a generator with an explicit model and temperature.
    pub fn with_model(settings: &LlmSettings, model: &str, temperature: f32) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: model.to_string(),
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAIGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| TutorError::Generation(e.to_string()))?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| TutorError::Generation(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            TutorError::OpenAI(format!("Failed to generate response: {}", e))
        })?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| TutorError::Generation("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated {} characters", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_models() {
        let mut settings = LlmSettings::default();
        settings.classifier_model = Some("gpt-4.1-nano".to_string());

        let answer = OpenAIGenerator::new(&settings).unwrap();
        assert_eq!(answer.model(), "gpt-4o-mini");

        let classifier = OpenAIGenerator::classifier(&settings).unwrap();
        assert_eq!(classifier.model(), "gpt-4.1-nano");
    }
}
