//! Interactive question loop.
//!
//! Each line is routed independently; nothing is carried between questions.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::router::Router;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask, &settings.llm) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tutor doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let router = Router::from_settings(&settings)?;

    println!("\n{}", style("Tutor").bold().cyan());
    println!(
        "{}\n",
        style("Ask a math, physics or chemistry question, or 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let spinner = Output::spinner("Thinking...");
        let result = router.route(input).await;
        spinner.finish_and_clear();

        println!(
            "\n{} {}\n",
            style(format!("{}:", result.agent_used)).cyan().bold(),
            result.answer
        );
        if !result.tools_used.is_empty() {
            println!("{}\n", style(format!("[{}]", result.tools_used.join(", "))).dim());
        }
    }

    Ok(())
}
