//! Schema-based result validation
//!
//! A `Schema` describes the object a guarded function must return.
//!
//! # Design Principles
//!
//! - Schemas are plain values passed to `SchemaValidator::new`
//! - Schemas are checked for consistency before use
//! - No nulls, defaults, or coercion
//! - Deterministic validation

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails};
pub use types::{FieldDef, FieldType, Format, Schema};
pub use validator::SchemaValidator;
