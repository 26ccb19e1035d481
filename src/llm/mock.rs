//! Scripted generator for tests and offline runs.

use super::TextGenerator;
use crate::error::{Result, TutorError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A generator that replays queued responses and records every prompt it saw.
///
/// When the queue is empty it answers with the fallback text.
pub struct MockGenerator {
    responses: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
    fallback: String,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::with_fallback("mock answer")
    }

    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            fallback: fallback.into(),
        }
    }

    /// Queue a successful response.
    pub fn push_text(&self, text: impl Into<String>) -> &Self {
        self.lock_responses().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure.
    pub fn push_error(&self, message: impl Into<String>) -> &Self {
        self.lock_responses()
            .push_back(Err(TutorError::Generation(message.into())));
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
