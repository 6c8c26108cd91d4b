//! Form template entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// The closed set of primitive kinds a field may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
}

impl FieldType {
    /// Get the declared name of the type, as written in template definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
        }
    }

    /// Get all recognized field types
    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::String,
            FieldType::Number,
            FieldType::Boolean,
            FieldType::Array,
        ]
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Matching is exact: "String" is not a recognized type.
impl std::str::FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "boolean" => Ok(FieldType::Boolean),
            "array" => Ok(FieldType::Array),
            _ => Err(format!(
                "Unknown field type: {} (valid: {})",
                s,
                FieldType::all()
                    .iter()
                    .map(FieldType::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// A single typed field declaration within a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name, unique within its template
    pub name: String,

    /// Declared primitive type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether a submission must carry this field
    pub required: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
        }
    }
}

/// A named, ordered set of field declarations that submissions are checked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    /// Unique identifier
    pub id: EntityId,

    /// Template name
    pub name: String,

    /// Field declarations, in declaration order
    pub fields: Vec<FieldDefinition>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for FormTemplate {
    const PREFIX: EntityPrefix = EntityPrefix::Tpl;
    const KIND: &'static str = "form template";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl FormTemplate {
    /// Number of fields a submission must carry
    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| f.required).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor() -> FormTemplate {
        FormTemplate {
            id: EntityId::new(EntityPrefix::Tpl),
            name: "Visitor".to_string(),
            fields: vec![
                FieldDefinition::new("fullName", FieldType::String, true),
                FieldDefinition::new("age", FieldType::Number, false),
            ],
            created: Utc::now(),
        }
    }

    #[test]
    fn test_template_serializes_field_type_key() {
        let yaml = serde_yml::to_string(&visitor()).unwrap();
        assert!(yaml.contains("type: string"));
        assert!(yaml.contains("type: number"));
        assert!(!yaml.contains("field_type"));
    }

    #[test]
    fn test_template_roundtrip_preserves_field_order() {
        let tpl = visitor();
        let json = serde_json::to_string(&tpl).unwrap();
        let parsed: FormTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tpl);
        assert_eq!(parsed.fields[0].name, "fullName");
        assert_eq!(parsed.fields[1].name, "age");
    }

    #[test]
    fn test_field_type_parse_is_exact() {
        assert_eq!("array".parse::<FieldType>().unwrap(), FieldType::Array);
        assert!("String".parse::<FieldType>().is_err());
        assert!("date".parse::<FieldType>().is_err());
        assert!("".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_required_count() {
        let tpl = visitor();
        assert_eq!(tpl.required_count(), 1);
    }
}
