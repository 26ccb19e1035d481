//! Text-generation collaborator.
//!
//! The tutor treats the language model as an opaque function: a prompt goes
//! in, text comes out, and the call may fail. Everything that talks to a model
//! goes through [`TextGenerator`].

mod mock;
mod openai;

pub use mock::MockGenerator;
pub use openai::OpenAIGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for prompt-in, text-out generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
