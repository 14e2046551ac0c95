//! Schema error types
//!
//! Error codes:
//! - VALIDALL_SCHEMA_VALIDATION_FAILED: value violates the schema
//! - VALIDALL_SCHEMA_MALFORMED: the schema itself is inconsistent
//! - VALIDALL_SCHEMA_EXAMPLE_REJECTED: a declared example fails its own schema

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Value violates schema
    ValidationFailed,
    /// Schema definition is inconsistent
    Malformed,
    /// Declared example does not validate
    ExampleRejected,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ValidationFailed => "VALIDALL_SCHEMA_VALIDATION_FAILED",
            SchemaErrorCode::Malformed => "VALIDALL_SCHEMA_MALFORMED",
            SchemaErrorCode::ExampleRejected => "VALIDALL_SCHEMA_EXAMPLE_REJECTED",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "user.address.city")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn too_short(field: impl Into<String>, min: usize, len: usize) -> Self {
        Self::new(field, format!("at least {} characters", min), format!("{} characters", len))
    }

    pub fn too_long(field: impl Into<String>, max: usize, len: usize) -> Self {
        Self::new(field, format!("at most {} characters", max), format!("{} characters", len))
    }

    pub fn bad_format(field: impl Into<String>, format: &str, actual: impl Into<String>) -> Self {
        Self::new(field, format!("{} format", format), format!("'{}'", actual.into()))
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema error with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    details: Option<ValidationDetails>,
}

impl SchemaError {
    /// Create a validation failed error
    pub fn validation_failed(details: ValidationDetails) -> Self {
        Self {
            code: SchemaErrorCode::ValidationFailed,
            message: format!("Value validation failed: {}", details),
            details: Some(details),
        }
    }

    /// Create an error for an inconsistent schema definition
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::Malformed,
            message: format!("Malformed schema: {}", reason.into()),
            details: None,
        }
    }

    /// Create an error for an example that fails its own schema
    pub fn example_rejected(index: usize, cause: SchemaError) -> Self {
        Self {
            code: SchemaErrorCode::ExampleRejected,
            message: format!("Schema example #{} rejected: {}", index, cause.message),
            details: cause.details,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns validation details if applicable
    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
