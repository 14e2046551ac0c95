//! Validator capabilities consumed by the guard
//!
//! Two seams:
//! - `InputValidator`: gates each positional argument before the call
//! - `ResultValidator`: gates the return value after the call
//!
//! Plain closures satisfy both traits. The concrete validators in this
//! module (`PatternValidator`, `SchemaValidator`) are configured explicitly
//! through their constructors.

pub mod pattern;
pub mod schema;

pub use pattern::PatternValidator;
pub use schema::{
    FieldDef, FieldType, Format, Schema, SchemaError, SchemaErrorCode, SchemaResult,
    SchemaValidator, ValidationDetails,
};

use std::error::Error;

/// Error raised by a result validator while inspecting a value.
///
/// The guard treats a fault exactly like a rejection.
pub type ValidatorFault = Box<dyn Error + Send + Sync + 'static>;

/// Predicate over a single call argument.
pub trait InputValidator<A: ?Sized> {
    /// Returns true if the argument is acceptable.
    fn accepts(&self, value: &A) -> bool;
}

impl<A: ?Sized, F> InputValidator<A> for F
where
    F: Fn(&A) -> bool,
{
    fn accepts(&self, value: &A) -> bool {
        self(value)
    }
}

/// Predicate over a function's return value.
pub trait ResultValidator<R: ?Sized> {
    /// Checks the value.
    ///
    /// `Ok(false)` and `Err(_)` both mean the value is rejected; the error
    /// form lets validators report why.
    fn check(&self, value: &R) -> Result<bool, ValidatorFault>;

    /// Collapses `check` into a plain verdict.
    fn accepts(&self, value: &R) -> bool {
        self.check(value).unwrap_or(false)
    }
}

impl<R: ?Sized, F> ResultValidator<R> for F
where
    F: Fn(&R) -> bool,
{
    fn check(&self, value: &R) -> Result<bool, ValidatorFault> {
        Ok(self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "validator broke")
        }
    }

    impl Error for Broken {}

    struct Faulty;

    impl ResultValidator<i32> for Faulty {
        fn check(&self, _value: &i32) -> Result<bool, ValidatorFault> {
            Err(Box::new(Broken))
        }
    }

    #[test]
    fn test_closure_is_input_validator() {
        let even = |n: &i32| n % 2 == 0;
        assert!(InputValidator::accepts(&even, &4));
        assert!(!InputValidator::accepts(&even, &3));
    }

    #[test]
    fn test_closure_is_result_validator() {
        let positive = |n: &i32| *n > 0;
        assert!(positive.check(&1).unwrap());
        assert!(!positive.check(&-1).unwrap());
    }

    #[test]
    fn test_fault_counts_as_rejection() {
        assert!(Faulty.check(&1).is_err());
        assert!(!ResultValidator::accepts(&Faulty, &1));
    }
}
