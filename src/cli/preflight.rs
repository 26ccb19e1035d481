//! Pre-flight checks before operations that call the language model.
//!
//! Validates that the API key is available before a request would otherwise
//! fail midway.

use crate::config::LlmSettings;
use crate::error::{Result, TutorError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Asking and classifying need the model.
    Ask,
    /// The server needs the model for every request.
    Serve,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, llm: &LlmSettings) -> Result<()> {
    match operation {
        Operation::Ask | Operation::Serve => check_api_key(&llm.api_key_env),
    }
}

/// Check if the configured API key variable is set.
fn check_api_key(var: &str) -> Result<()> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(()),
        Ok(_) => Err(TutorError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            var, var
        ))),
        Err(_) => Err(TutorError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            var, var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_names_the_variable() {
        let llm = LlmSettings {
            api_key_env: "TUTOR_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmSettings::default()
        };
        let err = check(Operation::Ask, &llm).unwrap_err();
        assert!(err.to_string().contains("TUTOR_TEST_KEY_THAT_IS_NEVER_SET not set"));
        assert!(check(Operation::Serve, &llm).is_err());
    }
}
