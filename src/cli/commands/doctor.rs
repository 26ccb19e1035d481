//! Doctor command - verify configuration and the offline tools.

use crate::cli::Output;
use crate::config::{LlmSettings, Settings};
use crate::tools::{Calculator, ConstantsTable, PeriodicTable, UnitConverter};
use console::style;
use std::path::{Path, PathBuf};

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: Option<&PathBuf>) -> anyhow::Result<()> {
    Output::header("Tutor Doctor");
    println!();
    println!("Checking configuration and tools...\n");

    let mut checks = Vec::new();

    // Language model
    println!("{}", style("Language Model").bold());
    let llm_checks = vec![
        check_api_key(&settings.llm, std::env::var(&settings.llm.api_key_env).ok()),
        CheckResult::ok("Model", &settings.llm.model),
        CheckResult::ok("Classifier model", settings.llm.classifier_model()),
        CheckResult::ok(
            "API base",
            settings.llm.api_base.as_deref().unwrap_or("OpenAI default"),
        ),
    ];
    for check in &llm_checks {
        check.print();
    }
    checks.extend(llm_checks);

    println!();

    // Offline tools
    println!("{}", style("Tools").bold());
    let tool_checks = check_tools();
    for check in &tool_checks {
        check.print();
    }
    checks.extend(tool_checks);

    println!();

    // Configuration
    println!("{}", style("Configuration").bold());
    let path = config_path
        .cloned()
        .unwrap_or_else(Settings::default_config_path);
    let config_check = check_config_file(&path);
    config_check.print();
    checks.push(config_check);

    if let Some(dir) = settings.prompts_dir() {
        let prompts_check = check_prompts_dir(&dir);
        prompts_check.print();
        checks.push(prompts_check);
    }

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using the tutor.",
            errors
        ));
        anyhow::bail!("{} doctor check(s) failed", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! The tutor is ready to use.");
    }

    Ok(())
}

/// Check the API key variable named in the settings.
fn check_api_key(llm: &LlmSettings, value: Option<String>) -> CheckResult {
    let name = llm.api_key_env.as_str();
    let set_hint = format!("Set with: export {}='...'", name);

    match value {
        Some(key) if key.trim().is_empty() => CheckResult::error(name, "empty", &set_hint),
        Some(key) if key.chars().count() > 12 => {
            let chars: Vec<char> = key.chars().collect();
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            let masked = format!("{}...{}", head, tail);
            CheckResult::ok(name, &format!("configured ({})", masked))
        }
        Some(_) => CheckResult::warning(
            name,
            "set but looks too short",
            "Check that the full key was copied",
        ),
        None => CheckResult::error(name, "not set", &set_hint),
    }
}

/// Exercise each deterministic tool once.
fn check_tools() -> Vec<CheckResult> {
    let mut results = Vec::new();

    let calc = Calculator::new().evaluate("2 + 2");
    results.push(if calc.success && calc.result == Some(4.0) {
        CheckResult::ok("Calculator", &calc.to_string())
    } else {
        CheckResult::error("Calculator", "self-test failed", "Report this as a bug")
    });

    results.push(match UnitConverter::new().conversion(100.0, "km", "m") {
        Some(conversion) => CheckResult::ok("Unit converter", &conversion.to_string()),
        None => CheckResult::error("Unit converter", "self-test failed", "Report this as a bug"),
    });

    let constants = ConstantsTable::new();
    results.push(CheckResult::ok(
        "Constants",
        &format!("{} loaded", constants.all().len()),
    ));

    let elements = PeriodicTable::new();
    results.push(CheckResult::ok(
        "Periodic table",
        &format!("{} elements loaded", elements.all().len()),
    ));

    results
}

/// Check if the config file exists.
fn check_config_file(path: &Path) -> CheckResult {
    if path.exists() {
        CheckResult::ok("Config file", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tutor config edit",
        )
    }
}

/// Check the custom prompts directory.
fn check_prompts_dir(dir: &Path) -> CheckResult {
    if dir.is_dir() {
        CheckResult::ok("Prompts directory", &format!("{}", dir.display()))
    } else {
        CheckResult::warning(
            "Prompts directory",
            &format!("{} (not found)", dir.display()),
            "Built-in prompts will be used",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_api_key_states() {
        let llm = LlmSettings::default();

        assert_eq!(check_api_key(&llm, None).status, CheckStatus::Error);
        assert_eq!(
            check_api_key(&llm, Some("  ".to_string())).status,
            CheckStatus::Error
        );
        assert_eq!(
            check_api_key(&llm, Some("abc".to_string())).status,
            CheckStatus::Warning
        );

        let ok = check_api_key(&llm, Some("sk-test-0123456789abcdef".to_string()));
        assert_eq!(ok.status, CheckStatus::Ok);
        assert_eq!(ok.name, "OPENAI_API_KEY");
        assert!(ok.message.contains("sk-t...cdef"));
    }

    #[test]
    fn test_tools_self_check_passes() {
        let results = check_tools();
        assert!(results.iter().all(|c| c.status == CheckStatus::Ok));
        assert!(results[0].message.contains("= 4"));
        assert_eq!(results[1].message, "100 km = 100000 m");
    }

    #[test]
    fn test_config_file_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(check_config_file(&path).status, CheckStatus::Warning);

        std::fs::write(&path, "").unwrap();
        assert_eq!(check_config_file(&path).status, CheckStatus::Ok);
    }
}
