//! Validating decorator
//!
//! Wraps a function so its positional arguments are checked before the call
//! and its result after it, with a configurable repeat policy when the
//! result is rejected.
//!
//! # Usage
//!
//! ```
//! use validall::guard::{Kwargs, ValidAll, ValidationError};
//!
//! let non_empty = |s: &String| !s.is_empty();
//! let short = |n: &usize| *n < 10;
//!
//! let total_len = ValidAll::new(non_empty, short)
//!     .repeat(0)
//!     .wrap(|args: &[String], _: &Kwargs<String>| args.iter().map(String::len).sum::<usize>());
//!
//! assert_eq!(total_len.call(&["abc".to_string()]), Ok(3));
//! assert!(matches!(
//!     total_len.call(&[String::new()]),
//!     Err(ValidationError::InputInvalid { .. })
//! ));
//! ```
//!
//! The guard never logs and never translates errors: every
//! `ValidationError` reaches the caller as produced.

mod errors;
mod policy;
mod wrapper;

pub use errors::{GuardResult, Phase, ValidationError};
pub use policy::RepeatPolicy;
pub use wrapper::{Guarded, Kwargs, ValidAll};
