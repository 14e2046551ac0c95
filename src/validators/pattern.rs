//! Regex-backed input validator
//!
//! The pattern is supplied at construction. A value is accepted when the
//! pattern matches it; anchoring is up to the pattern itself.

use regex::Regex;
use serde_json::Value;

use super::InputValidator;

/// Default input pattern: `non-space@non-space.non-space`, whole value.
pub const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";

/// Input validator that matches string arguments against a regular expression.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    regex: Regex,
}

impl PatternValidator {
    /// Compiles `pattern` into a validator.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Validator for email-shaped strings.
    pub fn email() -> Result<Self, regex::Error> {
        Self::new(EMAIL_PATTERN)
    }

    /// Returns the source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if `value` matches the pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl InputValidator<str> for PatternValidator {
    fn accepts(&self, value: &str) -> bool {
        self.is_match(value)
    }
}

impl InputValidator<String> for PatternValidator {
    fn accepts(&self, value: &String) -> bool {
        self.is_match(value)
    }
}

/// Only JSON strings can match; every other value is rejected.
impl InputValidator<Value> for PatternValidator {
    fn accepts(&self, value: &Value) -> bool {
        value.as_str().map_or(false, |s| self.is_match(s))
    }
}
