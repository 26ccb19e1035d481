//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::router::{self, Router};
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(question: &str, json: bool, settings: Settings) -> Result<()> {
    let question = router::validate_question(question)?;

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask, &settings.llm) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tutor doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let router = Router::from_settings(&settings)?;

    let spinner = Output::spinner("Thinking...");
    let result = router.route(question).await;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        Output::answer(&result);
    }

    Ok(())
}
