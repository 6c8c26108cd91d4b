//! Form service - template registry plus the submission flow
//!
//! `submit` resolves the template, validates the record against its fields,
//! and only then writes. Failures from each step propagate with their kind
//! intact; nothing is written for a rejected record.

use serde_json::{Map, Value};

use crate::core::entity::Entity;
use crate::core::error::FormError;
use crate::core::identity::EntityId;
use crate::core::store::{FormStore, NewSubmission};
use crate::entities::{FormSubmission, FormTemplate};
use crate::schema::registry::TemplateRegistry;
use crate::schema::template::{FieldSpec, TemplateDefinition};
use crate::schema::validator::{ArrayMatching, RecordValidator};

pub struct FormService<S> {
    registry: TemplateRegistry<S>,
    validator: RecordValidator,
}

impl<S: FormStore> FormService<S> {
    pub fn new(store: S, arrays: ArrayMatching) -> Self {
        Self {
            registry: TemplateRegistry::new(store),
            validator: RecordValidator::new(arrays),
        }
    }

    /// Release the store so the caller can close it
    pub fn into_store(self) -> S {
        self.registry.into_store()
    }

    pub fn create_template(&self, name: &str, fields: &[FieldSpec]) -> Result<FormTemplate, FormError> {
        self.registry.create_template(name, fields)
    }

    pub fn create_from_definition(&self, definition: &TemplateDefinition) -> Result<FormTemplate, FormError> {
        self.registry.create_from_definition(definition)
    }

    pub fn get_template(&self, id: &str) -> Result<FormTemplate, FormError> {
        self.registry.get_template(id)
    }

    pub fn list_templates(&self) -> Result<Vec<FormTemplate>, FormError> {
        self.registry.list_templates()
    }

    /// Resolve a template and validate a record against it without writing
    pub fn check(&self, template_id: &str, record: &Map<String, Value>) -> Result<FormTemplate, FormError> {
        let template = self.registry.get_template(template_id)?;

        if let Err(e) = self.validator.validate(record, &template.fields) {
            tracing::debug!(template = %template.id, reason = %e, "record rejected");
            return Err(e.into());
        }

        Ok(template)
    }

    /// Validate a record against its template and persist it as a submission
    pub fn submit(&self, template_id: &str, record: Map<String, Value>) -> Result<FormSubmission, FormError> {
        let template = self.check(template_id, &record)?;

        let submission = self
            .registry
            .store()
            .insert_submission(&NewSubmission {
                template_id: template.id.clone(),
                data: record,
            })
            .map_err(|e| {
                FormError::persistence(format!("Error submitting form data: {}", template.id), e)
            })?;

        tracing::info!(
            id = %submission.id,
            template = %submission.template_id,
            "{} stored",
            FormSubmission::KIND
        );
        Ok(submission)
    }

    /// Resolve a submission by its identifier string
    pub fn get_submission(&self, id: &str) -> Result<FormSubmission, FormError> {
        let entity_id = EntityId::parse_as(id, FormSubmission::PREFIX)
            .map_err(|e| FormError::invalid_identifier(id, e))?;

        self.registry
            .store()
            .find_submission(&entity_id)
            .map_err(|e| FormError::persistence(format!("Error getting form submission: {}", entity_id), e))?
            .ok_or_else(|| FormError::SubmissionNotFound(entity_id.to_string()))
    }

    /// Submissions recorded against a template, newest first
    pub fn list_submissions(&self, template_id: &str) -> Result<Vec<FormSubmission>, FormError> {
        let template = self.registry.get_template(template_id)?;

        self.registry
            .store()
            .list_submissions(&template.id)
            .map_err(|e| {
                FormError::persistence(format!("Error listing submissions for: {}", template.id), e)
            })
    }
}
