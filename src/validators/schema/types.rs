//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string, optionally constrained by length and format
//! - int: 64-bit signed integer
//! - bool: Boolean
//! - float: 64-bit floating point
//! - object: Nested object with field schema
//! - array: Homogeneous array with element type

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::errors::{SchemaError, SchemaResult};
use super::validator::validate_value;

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// 64-bit floating point
    Float,
    /// Nested object with its own field schema
    Object {
        /// Nested field definitions
        fields: BTreeMap<String, FieldDef>,
    },
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Object { .. } => "object",
            FieldType::Array { .. } => "array",
        }
    }
}

/// Named string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `local@domain.tld`
    Email,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::Email => "email",
        }
    }

    /// Returns true if `value` conforms to the format.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Format::Email => is_email(value),
        }
    }
}

/// Exactly one '@', no whitespace, dotted domain with non-empty labels.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether field must be present
    pub required: bool,
    /// Human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Minimum length in characters (strings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length in characters (strings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Required string format (strings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl FieldDef {
    fn of(field_type: FieldType, required: bool) -> Self {
        Self {
            field_type,
            required,
            title: None,
            min_length: None,
            max_length: None,
            format: None,
        }
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self::of(FieldType::String, true)
    }

    /// Create a required int field
    pub fn required_int() -> Self {
        Self::of(FieldType::Int, true)
    }

    /// Create an optional int field
    pub fn optional_int() -> Self {
        Self::of(FieldType::Int, false)
    }

    /// Create a required bool field
    pub fn required_bool() -> Self {
        Self::of(FieldType::Bool, true)
    }

    /// Create a required object field
    pub fn required_object(fields: BTreeMap<String, FieldDef>) -> Self {
        Self::of(FieldType::Object { fields }, true)
    }

    /// Create a required array field
    pub fn required_array(element_type: FieldType) -> Self {
        Self::of(
            FieldType::Array {
                element_type: Box::new(element_type),
            },
            true,
        )
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Bounds the string length, inclusive on both ends.
    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    fn has_string_constraints(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some() || self.format.is_some()
    }
}

/// Schema for a result value: the root is always an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions
    pub fields: BTreeMap<String, FieldDef>,
    /// Whether keys not listed in `fields` are tolerated
    #[serde(default)]
    pub additional_properties: bool,
    /// Sample values that must satisfy the schema
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
}

impl Schema {
    /// Create a new closed schema
    pub fn new(fields: BTreeMap<String, FieldDef>) -> Self {
        Self {
            description: None,
            fields,
            additional_properties: false,
            examples: Vec::new(),
        }
    }

    /// Object with exactly one required `email` string of 6 to 20 characters.
    pub fn email_record() -> Self {
        let email = FieldDef::required_string()
            .with_title("Email address")
            .with_format(Format::Email)
            .with_length(Some(6), Some(20));

        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), email);

        let mut schema = Schema::new(fields);
        schema.examples.push(json!({ "email": "john@gmail.com" }));
        schema
    }

    pub fn with_examples(mut self, examples: Vec<Value>) -> Self {
        self.examples = examples;
        self
    }

    /// Validates the schema structure itself (not a value)
    pub fn validate_structure(&self) -> Result<(), String> {
        check_fields(&self.fields, "")
    }

    /// Validates every declared example against this schema.
    pub fn check_examples(&self) -> SchemaResult<()> {
        for (index, example) in self.examples.iter().enumerate() {
            validate_value(self, example).map_err(|e| SchemaError::example_rejected(index, e))?;
        }
        Ok(())
    }
}

fn check_fields(fields: &BTreeMap<String, FieldDef>, prefix: &str) -> Result<(), String> {
    for (name, def) in fields {
        if name.is_empty() {
            return Err(format!("empty field name under '{}'", display_prefix(prefix)));
        }
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };

        if def.has_string_constraints() && def.field_type != FieldType::String {
            return Err(format!(
                "field '{}': length and format constraints apply to strings, not {}",
                path,
                def.field_type.type_name()
            ));
        }
        if let (Some(min), Some(max)) = (def.min_length, def.max_length) {
            if min > max {
                return Err(format!("field '{}': min_length {} exceeds max_length {}", path, min, max));
            }
        }
        if let FieldType::Object { fields } = &def.field_type {
            check_fields(fields, &path)?;
        }
    }
    Ok(())
}

fn display_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        "$root"
    } else {
        prefix
    }
}
