//! Schema validator for result values
//!
//! Validation semantics:
//! - Root value is an object
//! - All required fields are present
//! - No undeclared fields exist, unless the schema allows them
//! - Field types exactly match schema types
//! - String length and format constraints hold
//!
//! Forbidden:
//! - Implicit type coercion
//! - Null values

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{FieldDef, FieldType, Schema};
use crate::validators::{ResultValidator, ValidatorFault};

/// Result validator that enforces a `Schema` on JSON values.
///
/// The validator owns its schema and never mutates the value it checks.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: Schema,
}

impl SchemaValidator {
    /// Creates a validator for `schema`.
    ///
    /// # Errors
    ///
    /// Returns `VALIDALL_SCHEMA_MALFORMED` if the schema is internally
    /// inconsistent, or `VALIDALL_SCHEMA_EXAMPLE_REJECTED` if one of its
    /// examples does not validate.
    pub fn new(schema: Schema) -> SchemaResult<Self> {
        schema.validate_structure().map_err(SchemaError::malformed)?;
        schema.check_examples()?;
        Ok(Self { schema })
    }

    /// Validator for the email record schema.
    pub fn email_record() -> SchemaResult<Self> {
        Self::new(Schema::email_record())
    }

    /// Validates a value against the schema.
    ///
    /// Stops at the first violation and reports it.
    pub fn validate(&self, value: &Value) -> SchemaResult<()> {
        validate_value(&self.schema, value)
    }
}

impl ResultValidator<Value> for SchemaValidator {
    fn check(&self, value: &Value) -> Result<bool, ValidatorFault> {
        self.validate(value)?;
        Ok(true)
    }
}

pub(super) fn validate_value(schema: &Schema, value: &Value) -> SchemaResult<()> {
    let obj = value.as_object().ok_or_else(|| {
        SchemaError::validation_failed(ValidationDetails::type_mismatch(
            "$root",
            "object",
            json_type_name(value),
        ))
    })?;

    validate_object(obj, &schema.fields, schema.additional_properties, "")
}

/// Validates an object against field definitions.
fn validate_object(
    obj: &Map<String, Value>,
    fields: &BTreeMap<String, FieldDef>,
    additional_properties: bool,
    path_prefix: &str,
) -> SchemaResult<()> {
    if !additional_properties {
        if let Some(key) = obj.keys().find(|key| !fields.contains_key(*key)) {
            return Err(SchemaError::validation_failed(ValidationDetails::extra_field(
                make_path(path_prefix, key),
            )));
        }
    }

    for (field_name, field_def) in fields {
        let field_path = make_path(path_prefix, field_name);

        match obj.get(field_name) {
            Some(Value::Null) => {
                return Err(SchemaError::validation_failed(ValidationDetails::null_value(
                    &field_path,
                )));
            }
            Some(value) => {
                validate_value_type(value, &field_def.field_type, &field_path)?;
                validate_constraints(value, field_def, &field_path)?;
            }
            None if field_def.required => {
                return Err(SchemaError::validation_failed(ValidationDetails::missing_field(
                    field_path,
                )));
            }
            None => {}
        }
    }

    Ok(())
}

/// Validates a value against a field type.
fn validate_value_type(value: &Value, expected_type: &FieldType, field_path: &str) -> SchemaResult<()> {
    match expected_type {
        FieldType::String => {
            if !value.is_string() {
                return Err(type_error(field_path, "string", value));
            }
        }
        FieldType::Int => {
            if !value.is_i64() && !value.is_u64() {
                return Err(type_error(field_path, "int", value));
            }
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                return Err(type_error(field_path, "bool", value));
            }
        }
        FieldType::Float => {
            // Integers are acceptable floats
            if !value.is_number() {
                return Err(type_error(field_path, "float", value));
            }
        }
        FieldType::Object { fields } => {
            let obj = value
                .as_object()
                .ok_or_else(|| type_error(field_path, "object", value))?;
            validate_object(obj, fields, false, field_path)?;
        }
        FieldType::Array { element_type } => {
            let arr = value
                .as_array()
                .ok_or_else(|| type_error(field_path, "array", value))?;

            for (i, elem) in arr.iter().enumerate() {
                let elem_path = format!("{}[{}]", field_path, i);
                if elem.is_null() {
                    return Err(SchemaError::validation_failed(ValidationDetails::null_value(
                        &elem_path,
                    )));
                }
                validate_value_type(elem, element_type, &elem_path)?;
            }
        }
    }

    Ok(())
}

/// Checks length and format constraints on string fields.
fn validate_constraints(value: &Value, def: &FieldDef, field_path: &str) -> SchemaResult<()> {
    let Some(s) = value.as_str() else {
        return Ok(());
    };

    let len = s.chars().count();
    if let Some(min) = def.min_length {
        if len < min {
            return Err(SchemaError::validation_failed(ValidationDetails::too_short(
                field_path, min, len,
            )));
        }
    }
    if let Some(max) = def.max_length {
        if len > max {
            return Err(SchemaError::validation_failed(ValidationDetails::too_long(
                field_path, max, len,
            )));
        }
    }
    if let Some(format) = def.format {
        if !format.matches(s) {
            return Err(SchemaError::validation_failed(ValidationDetails::bad_format(
                field_path,
                format.name(),
                s,
            )));
        }
    }

    Ok(())
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn type_error(field_path: &str, expected: &str, actual: &Value) -> SchemaError {
    SchemaError::validation_failed(ValidationDetails::type_mismatch(
        field_path,
        expected,
        json_type_name(actual),
    ))
}
