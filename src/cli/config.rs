//! Guard configuration file
//!
//! A single JSON object. Every key is optional:
//!
//! ```json
//! {
//!   "input_pattern": "^\\S+@\\S+\\.\\S+$",
//!   "result_schema": { "fields": { ... } },
//!   "repeat_count": 1,
//!   "fallback": false,
//!   "log_level": "INFO"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::demo::notify_fallback;
use crate::guard::ValidAll;
use crate::observability::{Logger, Severity};
use crate::validators::pattern::EMAIL_PATTERN;
use crate::validators::{PatternValidator, Schema, SchemaValidator};

use super::errors::{CliError, CliResult};

/// Configuration for the demo guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Regex every positional argument must match (default: email shape)
    #[serde(default = "default_input_pattern")]
    pub input_pattern: String,

    /// Schema the result must satisfy (default: email record)
    #[serde(default = "Schema::email_record")]
    pub result_schema: Schema,

    /// Repeat count: >= 1 bounded retries, 0 none, < 0 until accepted (default 1).
    ///
    /// A negative count never returns for an input whose result is always
    /// rejected, since the demo function is deterministic.
    #[serde(default = "default_repeat_count")]
    pub repeat_count: i64,

    /// Run the logging fallback after bounded retries (default false)
    #[serde(default)]
    pub fallback: bool,

    /// Minimum severity written to the log (default INFO)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_input_pattern() -> String {
    EMAIL_PATTERN.to_string()
}
fn default_repeat_count() -> i64 {
    1
}
fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            input_pattern: default_input_pattern(),
            result_schema: Schema::email_record(),
            repeat_count: default_repeat_count(),
            fallback: false,
            log_level: default_log_level(),
        }
    }
}

impl GuardConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: GuardConfig = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Checks that the validators can be built from this configuration.
    pub fn validate(&self) -> CliResult<()> {
        self.input_validator()?;
        self.result_validator()?;
        Ok(())
    }

    pub fn input_validator(&self) -> CliResult<PatternValidator> {
        PatternValidator::new(&self.input_pattern).map_err(|e| {
            CliError::config_error(format!("Invalid input_pattern '{}': {}", self.input_pattern, e))
        })
    }

    pub fn result_validator(&self) -> CliResult<SchemaValidator> {
        SchemaValidator::new(self.result_schema.clone())
            .map_err(|e| CliError::config_error(format!("Invalid result_schema: {}", e)))
    }

    pub fn logger(&self) -> Logger {
        Logger::new(self.log_level)
    }

    /// Builds the decorator described by this configuration.
    pub fn decorator(&self) -> CliResult<ValidAll<PatternValidator, SchemaValidator>> {
        let decorator = ValidAll::new(self.input_validator()?, self.result_validator()?)
            .repeat(self.repeat_count);

        if self.fallback {
            Ok(decorator.with_fallback(notify_fallback(self.logger(), self.repeat_count)))
        } else {
            Ok(decorator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::RepeatPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = GuardConfig::from_json("{}").unwrap();
        assert_eq!(config, GuardConfig::default());
        assert_eq!(config.input_pattern, EMAIL_PATTERN);
        assert_eq!(config.repeat_count, 1);
        assert!(!config.fallback);
    }

    #[test]
    fn test_overrides() {
        let config = GuardConfig::from_json(
            r#"{ "input_pattern": "^\\d+$", "repeat_count": -1, "fallback": true, "log_level": "WARN" }"#,
        )
        .unwrap();

        assert_eq!(config.input_pattern, r"^\d+$");
        assert_eq!(config.log_level, Severity::Warn);

        let decorator = config.decorator().unwrap();
        assert_eq!(decorator.policy(), RepeatPolicy::Unbounded);
        assert!(decorator.has_fallback());
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let err = GuardConfig::from_json(r#"{ "input_pattern": "(" }"#).unwrap_err();
        assert!(err.message().contains("input_pattern"));
    }

    #[test]
    fn test_malformed_schema_rejected() {
        let err = GuardConfig::from_json(
            r#"{ "result_schema": { "fields": { "n": { "type": "int", "required": true, "max_length": 3 } } } }"#,
        )
        .unwrap_err();
        assert!(err.message().contains("result_schema"));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = GuardConfig::from_json("{ not json").unwrap_err();
        assert!(err.message().contains("Invalid config JSON"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "repeat_count": 0 }}"#).unwrap();

        let config = GuardConfig::load(file.path()).unwrap();
        assert_eq!(config.repeat_count, 0);
        assert_eq!(GuardConfig::load_or_default(None).unwrap(), GuardConfig::default());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = GuardConfig::load(Path::new("/nonexistent/validall.json")).unwrap_err();
        assert_eq!(err.code_str(), "VALIDALL_CLI_CONFIG_ERROR");
    }
}
