//! Template definitions as authored by callers
//!
//! A definition is untrusted input: field types are kept as the raw text the
//! caller wrote, whatever its YAML/JSON kind, so that the registry can report
//! exactly which declared type it did not recognize.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// A field as declared by the caller, before type checking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,

    #[serde(rename = "type", deserialize_with = "declared_type")]
    pub field_type: String,

    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            required,
        }
    }

    /// Parse the inline `name:type[:required]` form used on the command line
    ///
    /// The third segment accepts `required`/`optional` as well as `true`/`false`.
    pub fn parse_inline(spec: &str) -> Result<Self, DefinitionError> {
        let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
        let (name, field_type, required) = match parts.as_slice() {
            [name, field_type] => (*name, *field_type, false),
            [name, field_type, flag] => {
                let required = match flag.to_lowercase().as_str() {
                    "required" | "true" | "yes" => true,
                    "optional" | "false" | "no" => false,
                    _ => return Err(DefinitionError::InlineField(spec.to_string())),
                };
                (*name, *field_type, required)
            }
            _ => return Err(DefinitionError::InlineField(spec.to_string())),
        };

        Ok(Self::new(name, field_type, required))
    }
}

/// Accept any value as a declared type; non-strings are kept as written (`1`, `true`, `["x"]`)
fn declared_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// A complete template definition: `{ name, fields: [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl TemplateDefinition {
    /// Parse a definition from YAML or JSON text (JSON is a YAML subset)
    pub fn parse(content: &str) -> Result<Self, DefinitionError> {
        serde_yml::from_str(content).map_err(|e| DefinitionError::Parse(e.to_string()))
    }

    /// Load a definition file
    pub fn from_file(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|e| DefinitionError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }
}

/// Errors reading a template definition
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid field spec '{0}' (expected name:type or name:type:required)")]
    InlineField(String),

    #[error("failed to parse template definition: {0}")]
    Parse(String),

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_field() {
        assert_eq!(
            FieldSpec::parse_inline("fullName:string:required").unwrap(),
            FieldSpec::new("fullName", "string", true)
        );
        assert_eq!(
            FieldSpec::parse_inline("age:number").unwrap(),
            FieldSpec::new("age", "number", false)
        );
        assert_eq!(
            FieldSpec::parse_inline("age : number : false").unwrap(),
            FieldSpec::new("age", "number", false)
        );
    }

    #[test]
    fn test_parse_inline_keeps_unknown_types_for_the_registry() {
        let spec = FieldSpec::parse_inline("when:date").unwrap();
        assert_eq!(spec.field_type, "date");
    }

    #[test]
    fn test_parse_inline_rejects_malformed() {
        assert!(FieldSpec::parse_inline("justaname").is_err());
        assert!(FieldSpec::parse_inline("a:string:maybe").is_err());
        assert!(FieldSpec::parse_inline("a:b:c:d").is_err());
    }

    #[test]
    fn test_definition_from_yaml() {
        let def = TemplateDefinition::parse(
            r#"
name: Visitor
fields:
  - name: fullName
    type: string
    required: true
  - name: age
    type: number
"#,
        )
        .unwrap();

        assert_eq!(def.name, "Visitor");
        assert_eq!(
            def.fields,
            vec![
                FieldSpec::new("fullName", "string", true),
                FieldSpec::new("age", "number", false),
            ]
        );
    }

    #[test]
    fn test_definition_from_json() {
        let def = TemplateDefinition::parse(
            r#"{"name": "Badge", "fields": [{"name": "tags", "type": "array", "required": false}]}"#,
        )
        .unwrap();
        assert_eq!(def.fields[0].field_type, "array");
    }

    #[test]
    fn test_definition_keeps_non_string_types_as_written() {
        let def = TemplateDefinition::parse(
            r#"
name: Odd
fields:
  - name: a
    type: 1
  - name: b
    type: true
  - name: c
    type: [x]
"#,
        )
        .unwrap();

        let types: Vec<&str> = def.fields.iter().map(|f| f.field_type.as_str()).collect();
        assert_eq!(types, vec!["1", "true", r#"["x"]"#]);
    }

    #[test]
    fn test_definition_missing_name_fails() {
        assert!(TemplateDefinition::parse("fields: []").is_err());
    }
}
