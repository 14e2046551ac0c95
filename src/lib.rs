//! validall - validate function inputs and results
//!
//! A function wrapped by `guard::ValidAll` has its positional arguments
//! checked before the call and its result checked after it, with a
//! configurable retry and fallback policy when the result is rejected.

pub mod cli;
pub mod demo;
pub mod guard;
pub mod observability;
pub mod validators;
