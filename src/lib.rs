//! Tutor - subject-routing study assistant
//!
//! A small multi-agent system that answers student questions in math,
//! physics and chemistry.
//!
//! # Overview
//!
//! A question goes through three stages:
//! - Classification: keyword scoring first, a language-model fallback when
//!   no subject clearly wins
//! - Tool selection: the subject agent runs pattern detectors and calls the
//!   deterministic tools they pick (calculator, unit converter, constants,
//!   formula catalog, periodic table)
//! - Generation: tool output is slotted into a prompt template and a
//!   language model writes the final answer
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `llm` - Text-generation trait with OpenAI and mock implementations
//! - `tools` - Deterministic tools and reference tables
//! - `detect` - Pattern detectors and extractors that pick tools
//! - `agent` - Subject agents
//! - `router` - Classifier and dispatch
//! - `cli` - Command-line interface and HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use tutor::config::Settings;
//! use tutor::router::Router;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let router = Router::from_settings(&settings)?;
//!
//!     let result = router.route("What is 15% of 80?").await;
//!     println!("{} ({})", result.answer, result.agent_used);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod llm;
pub mod openai;
pub mod router;
pub mod tools;

pub use error::{Result, TutorError};
