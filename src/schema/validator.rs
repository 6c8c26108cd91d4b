//! Record validation against a template's field declarations
//!
//! Validation is a pure function of the record and the field list. Checks
//! run in a fixed order so the first reported failure is reproducible:
//!
//! 1. Walk the fields in declaration order. A required field with no entry
//!    fails with [`RecordError::MissingRequiredField`]; a present value whose
//!    runtime tag differs from the declared type fails with
//!    [`RecordError::FieldTypeMismatch`]. The first failure ends the walk.
//! 2. Once every declared field passes, any record keys the template does
//!    not declare are reported together as [`RecordError::UnknownFields`].

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

use crate::entities::{FieldDefinition, FieldType};

/// How values are matched against fields declared as `array`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMatching {
    /// A JSON array carries the `array` tag
    #[default]
    Sequence,
    /// A JSON array carries the `object` tag, so `array` fields accept nothing
    Legacy,
}

impl std::fmt::Display for ArrayMatching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrayMatching::Sequence => write!(f, "sequence"),
            ArrayMatching::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for ArrayMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequence" => Ok(ArrayMatching::Sequence),
            "legacy" => Ok(ArrayMatching::Legacy),
            _ => Err(format!(
                "Unknown array matching mode: {} (valid: sequence, legacy)",
                s
            )),
        }
    }
}

/// The primitive kind observed on a submitted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    String,
    Number,
    Boolean,
    Array,
    /// JSON objects, `null`, and arrays under [`ArrayMatching::Legacy`]
    Object,
}

impl ValueTag {
    /// Compute the runtime tag of a value
    pub fn of(value: &Value, arrays: ArrayMatching) -> Self {
        match value {
            Value::String(_) => ValueTag::String,
            Value::Number(_) => ValueTag::Number,
            Value::Bool(_) => ValueTag::Boolean,
            Value::Array(_) => match arrays {
                ArrayMatching::Sequence => ValueTag::Array,
                ArrayMatching::Legacy => ValueTag::Object,
            },
            Value::Object(_) | Value::Null => ValueTag::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTag::String => "string",
            ValueTag::Number => "number",
            ValueTag::Boolean => "boolean",
            ValueTag::Array => "array",
            ValueTag::Object => "object",
        }
    }

    /// Whether a value with this tag satisfies the declared field type
    pub fn satisfies(&self, declared: FieldType) -> bool {
        matches!(
            (self, declared),
            (ValueTag::String, FieldType::String)
                | (ValueTag::Number, FieldType::Number)
                | (ValueTag::Boolean, FieldType::Boolean)
                | (ValueTag::Array, FieldType::Array)
        )
    }
}

impl std::fmt::Display for ValueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RecordError {
    #[error("Missing required field: {field}")]
    #[diagnostic(
        code(dynaform::record::missing_required_field),
        help("Add a value for '{field}' to the submitted data")
    )]
    MissingRequiredField { field: String },

    #[error("Invalid type for field {field}. Expected {expected}, got {actual}")]
    #[diagnostic(code(dynaform::record::field_type_mismatch))]
    FieldTypeMismatch {
        field: String,
        expected: FieldType,
        actual: ValueTag,
    },

    #[error("Invalid form data. Extra keys found: {}", .0.join(", "))]
    #[diagnostic(
        code(dynaform::record::unknown_fields),
        help("Remove keys the template does not declare, or check their spelling")
    )]
    UnknownFields(Vec<String>),
}

/// Validates records under a fixed array matching mode
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator {
    arrays: ArrayMatching,
}

impl RecordValidator {
    pub fn new(arrays: ArrayMatching) -> Self {
        Self { arrays }
    }

    /// Check a record against field declarations, returning the first failure
    pub fn validate(
        &self,
        record: &Map<String, Value>,
        fields: &[FieldDefinition],
    ) -> Result<(), RecordError> {
        for field in fields {
            match record.get(&field.name) {
                None if field.required => {
                    return Err(RecordError::MissingRequiredField {
                        field: field.name.clone(),
                    });
                }
                None => {}
                Some(value) => {
                    let actual = ValueTag::of(value, self.arrays);
                    if !actual.satisfies(field.field_type) {
                        return Err(RecordError::FieldTypeMismatch {
                            field: field.name.clone(),
                            expected: field.field_type,
                            actual,
                        });
                    }
                }
            }
        }

        let declared: HashSet<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        let extra: Vec<String> = record
            .keys()
            .filter(|key| !declared.contains(key.as_str()))
            .cloned()
            .collect();

        if extra.is_empty() {
            Ok(())
        } else {
            Err(RecordError::UnknownFields(extra))
        }
    }
}

/// Validate with the default array matching mode
pub fn validate(record: &Map<String, Value>, fields: &[FieldDefinition]) -> Result<(), RecordError> {
    RecordValidator::default().validate(record, fields)
}
