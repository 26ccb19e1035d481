//! Configuration module for the tutor.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{
    ChemistryPrompt, ClassifierPrompt, GeneralPrompt, MathPrompt, PhysicsPrompt, PromptBuilder,
    Prompts,
};
pub use settings::{GeneralSettings, LlmSettings, PromptSettings, ServerSettings, Settings};
