//! Classify command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::router::Router;
use anyhow::Result;

/// Show keyword scores and the final category for a question.
///
/// The model is only consulted when the keyword pass is inconclusive, so the
/// API key is only required in that case.
pub async fn run_classify(question: &str, settings: Settings) -> Result<()> {
    let router = match Router::from_settings(&settings) {
        Ok(router) => router,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let registry = router.classifier().registry();

    Output::header("Keyword scores");
    for (category, score) in registry.scores(question) {
        Output::kv(category.as_str(), &score.to_string());
    }

    if registry.best(question).is_none() {
        Output::info("No keyword winner, asking the model...");
        if let Err(e) = preflight::check(Operation::Ask, &settings.llm) {
            Output::warning(&format!("{}", e));
        }
    }

    let category = router.classify(question).await;
    println!();
    Output::success(&format!("Category: {}", category));

    Ok(())
}
