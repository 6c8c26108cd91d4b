//! Template registry - the only writer and reader of template identity

use std::collections::HashSet;

use crate::core::entity::Entity;
use crate::core::error::FormError;
use crate::core::identity::EntityId;
use crate::core::store::{FormStore, NewTemplate};
use crate::entities::{FieldDefinition, FieldType, FormTemplate};
use crate::schema::template::{FieldSpec, TemplateDefinition};

/// Check a caller's template definition and resolve its declared field types
///
/// Field types are scanned first, in order, and the first unrecognized type is
/// reported as written. Shape rules (non-empty name, at least one field,
/// non-empty and unique field names) are checked after every type resolves.
pub fn check_definition(name: &str, fields: &[FieldSpec]) -> Result<Vec<FieldDefinition>, FormError> {
    let mut resolved = Vec::with_capacity(fields.len());
    for spec in fields {
        let field_type: FieldType = spec
            .field_type
            .parse()
            .map_err(|_| FormError::InvalidFieldType(spec.field_type.clone()))?;
        resolved.push(FieldDefinition::new(spec.name.clone(), field_type, spec.required));
    }

    if name.trim().is_empty() {
        return Err(FormError::InvalidTemplate(
            "template name must not be empty".to_string(),
        ));
    }
    if resolved.is_empty() {
        return Err(FormError::InvalidTemplate(
            "a template needs at least one field".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (index, field) in resolved.iter().enumerate() {
        if field.name.trim().is_empty() {
            return Err(FormError::InvalidTemplate(format!(
                "field #{} has an empty name",
                index + 1
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(FormError::InvalidTemplate(format!(
                "field '{}' is declared more than once",
                field.name
            )));
        }
    }

    Ok(resolved)
}

/// Validates, persists and resolves form templates
pub struct TemplateRegistry<S> {
    store: S,
}

impl<S: FormStore> TemplateRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The storage collaborator this registry writes through
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to close it at shutdown
    pub fn into_store(self) -> S {
        self.store
    }

    /// Create a template after checking its definition
    ///
    /// Nothing is written unless every check passes. The stored template keeps
    /// the caller's field order.
    pub fn create_template(&self, name: &str, fields: &[FieldSpec]) -> Result<FormTemplate, FormError> {
        let fields = check_definition(name, fields)?;

        let template = self
            .store
            .insert_template(&NewTemplate {
                name: name.to_string(),
                fields,
            })
            .map_err(|e| FormError::persistence(format!("Error creating form template '{}'", name), e))?;

        tracing::info!(
            id = %template.id,
            name = %template.name,
            fields = template.fields.len(),
            "{} created",
            FormTemplate::KIND
        );
        Ok(template)
    }

    /// Create a template from a parsed definition file
    pub fn create_from_definition(&self, definition: &TemplateDefinition) -> Result<FormTemplate, FormError> {
        self.create_template(&definition.name, &definition.fields)
    }

    /// Resolve a template by its identifier string
    pub fn get_template(&self, id: &str) -> Result<FormTemplate, FormError> {
        let entity_id = EntityId::parse_as(id, FormTemplate::PREFIX)
            .map_err(|e| FormError::invalid_identifier(id, e))?;
        self.get_template_by_id(&entity_id)
    }

    /// Resolve a template by an already-parsed identifier
    pub fn get_template_by_id(&self, id: &EntityId) -> Result<FormTemplate, FormError> {
        let found = self
            .store
            .find_template(id)
            .map_err(|e| FormError::persistence(format!("Error getting form template: {}", id), e))?;

        match found {
            Some(template) => {
                tracing::debug!(id = %id, "{} resolved", FormTemplate::KIND);
                Ok(template)
            }
            None => {
                tracing::warn!(id = %id, "{} not found", FormTemplate::KIND);
                Err(FormError::TemplateNotFound(id.to_string()))
            }
        }
    }

    /// All templates, newest first
    pub fn list_templates(&self) -> Result<Vec<FormTemplate>, FormError> {
        self.store
            .list_templates()
            .map_err(|e| FormError::persistence("Error listing form templates", e))
    }
}
