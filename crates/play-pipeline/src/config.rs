//! Run configuration.

use serde::Deserialize;
use thiserror::Error;

use play_eval::{InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};
use play_types::MAX_DIAGNOSTICS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid run configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for one pipeline run.
///
/// Every field is optional in JSON; missing fields take their default and
/// unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Name used in diagnostics.
    pub file_name: String,
    /// Nested call limit before the run fails with a stack overflow.
    pub max_call_depth: usize,
    /// Diagnostics stored across all stages; later ones are only counted.
    pub max_diagnostics: usize,
    /// Interpret even when the front end reported errors.
    pub interpret_with_errors: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            file_name: "main.play".to_string(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_diagnostics: MAX_DIAGNOSTICS,
            interpret_with_errors: true,
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn interpreter(&self) -> InterpreterConfig {
        InterpreterConfig {
            max_call_depth: self.max_call_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.file_name, "main.play");
        assert_eq!(config.max_call_depth, 200);
        assert_eq!(config.max_diagnostics, 100);
        assert!(config.interpret_with_errors);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(RunConfig::from_json_str("{}").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = RunConfig::from_json_str(r#"{ "max_call_depth": 16 }"#).unwrap();
        assert_eq!(config.max_call_depth, 16);
        assert_eq!(config.file_name, "main.play");
        assert_eq!(config.interpreter().max_call_depth, 16);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RunConfig::from_json_str(r#"{ "gas_limit": 5 }"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            RunConfig::from_json_str("{ max_call_depth: }"),
            Err(ConfigError::Json(_))
        ));
    }
}
