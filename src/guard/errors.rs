//! Guard error taxonomy
//!
//! Error codes:
//! - VALIDALL_INPUT_INVALID: a positional argument failed the input validator
//! - VALIDALL_RESULT_INVALID: bounded retries exhausted without a fallback
//! - VALIDALL_ZERO_BUDGET: result rejected with a repeat count of zero

use std::fmt;

use thiserror::Error;

/// Phase of a guarded call that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the underlying function ran
    Input,
    /// After the underlying function returned
    Result,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Input => "input",
            Phase::Result => "result",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned by a guarded call.
///
/// Every variant carries the offending payload for diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError<A: fmt::Debug, R: fmt::Debug> {
    /// At least one positional argument was rejected.
    #[error("input validation failed: {args:?}")]
    InputInvalid {
        /// All positional arguments of the call
        args: Vec<A>,
    },

    /// The result was rejected and every retry was spent.
    #[error("result validation failed: {results:?}")]
    ResultInvalid {
        /// Result of each retry, in call order
        results: Vec<R>,
    },

    /// The result was rejected and no retries were allowed.
    #[error("result validation failed with zero retry budget (repeat count {repeat_count})")]
    ZeroBudgetRejected {
        /// The configured repeat count
        repeat_count: i64,
    },
}

impl<A: fmt::Debug, R: fmt::Debug> ValidationError<A, R> {
    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InputInvalid { .. } => "VALIDALL_INPUT_INVALID",
            ValidationError::ResultInvalid { .. } => "VALIDALL_RESULT_INVALID",
            ValidationError::ZeroBudgetRejected { .. } => "VALIDALL_ZERO_BUDGET",
        }
    }

    /// Returns the phase that failed
    pub fn phase(&self) -> Phase {
        match self {
            ValidationError::InputInvalid { .. } => Phase::Input,
            ValidationError::ResultInvalid { .. } | ValidationError::ZeroBudgetRejected { .. } => {
                Phase::Result
            }
        }
    }
}

/// Result type for guarded calls
pub type GuardResult<T, A> = Result<T, ValidationError<A, T>>;

#[cfg(test)]
mod tests {
    use super::*;

    type TestError = ValidationError<String, i32>;

    #[test]
    fn test_error_codes() {
        let input: TestError = ValidationError::InputInvalid { args: vec![] };
        let result: TestError = ValidationError::ResultInvalid { results: vec![] };
        let zero: TestError = ValidationError::ZeroBudgetRejected { repeat_count: 0 };

        assert_eq!(input.code(), "VALIDALL_INPUT_INVALID");
        assert_eq!(result.code(), "VALIDALL_RESULT_INVALID");
        assert_eq!(zero.code(), "VALIDALL_ZERO_BUDGET");
    }

    #[test]
    fn test_phases() {
        let input: TestError = ValidationError::InputInvalid { args: vec!["a".into()] };
        let zero: TestError = ValidationError::ZeroBudgetRejected { repeat_count: 0 };

        assert_eq!(input.phase(), Phase::Input);
        assert_eq!(zero.phase(), Phase::Result);
    }

    #[test]
    fn test_display_names_phase_and_payload() {
        let input: TestError = ValidationError::InputInvalid { args: vec!["a".into()] };
        assert_eq!(input.to_string(), "input validation failed: [\"a\"]");

        let result: TestError = ValidationError::ResultInvalid { results: vec![7, 8] };
        assert_eq!(result.to_string(), "result validation failed: [7, 8]");

        let zero: TestError = ValidationError::ZeroBudgetRejected { repeat_count: 0 };
        assert!(zero.to_string().contains("repeat count 0"));
    }
}
