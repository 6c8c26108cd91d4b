//! FormStore implementation for the SQLite store

use rusqlite::{params, OptionalExtension, Row};
use serde_json::{Map, Value};

use super::{
    format_datetime, now, parse_datetime, parse_id, FormStore, NewSubmission, NewTemplate,
    SqliteStore, StoreError,
};
use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::entities::{FieldDefinition, FormSubmission, FormTemplate};

const TEMPLATE_COLUMNS: &str = "id, name, fields, created";
const SUBMISSION_COLUMNS: &str = "id, template_id, data, created";

/// Raw template row as stored
struct TemplateRow {
    id: String,
    name: String,
    fields: String,
    created: String,
}

impl TemplateRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            fields: row.get(2)?,
            created: row.get(3)?,
        })
    }

    fn decode(self) -> Result<FormTemplate, StoreError> {
        let fields: Vec<FieldDefinition> = serde_json::from_str(&self.fields)?;
        Ok(FormTemplate {
            id: parse_id("templates", &self.id)?,
            name: self.name,
            fields,
            created: parse_datetime("templates", &self.created)?,
        })
    }
}

/// Raw submission row as stored
struct SubmissionRow {
    id: String,
    template_id: String,
    data: String,
    created: String,
}

impl SubmissionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            template_id: row.get(1)?,
            data: row.get(2)?,
            created: row.get(3)?,
        })
    }

    fn decode(self) -> Result<FormSubmission, StoreError> {
        let data: Map<String, Value> = serde_json::from_str(&self.data)?;
        Ok(FormSubmission {
            id: parse_id("submissions", &self.id)?,
            template_id: parse_id("submissions", &self.template_id)?,
            data,
            created: parse_datetime("submissions", &self.created)?,
        })
    }
}

impl FormStore for SqliteStore {
    fn insert_template(&self, template: &NewTemplate) -> Result<FormTemplate, StoreError> {
        let saved = FormTemplate {
            id: EntityId::new(FormTemplate::PREFIX),
            name: template.name.clone(),
            fields: template.fields.clone(),
            created: now(),
        };

        self.conn.execute(
            "INSERT INTO templates (id, name, fields, created) VALUES (?1, ?2, ?3, ?4)",
            params![
                saved.id.to_string(),
                saved.name,
                serde_json::to_string(&saved.fields)?,
                format_datetime(&saved.created),
            ],
        )?;

        Ok(saved)
    }

    fn find_template(&self, id: &EntityId) -> Result<Option<FormTemplate>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM templates WHERE id = ?1", TEMPLATE_COLUMNS),
                params![id.to_string()],
                TemplateRow::from_row,
            )
            .optional()?;

        row.map(TemplateRow::decode).transpose()
    }

    fn list_templates(&self) -> Result<Vec<FormTemplate>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM templates ORDER BY created DESC, id DESC",
            TEMPLATE_COLUMNS
        ))?;

        let rows = stmt
            .query_map([], TemplateRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(TemplateRow::decode).collect()
    }

    fn insert_submission(&self, submission: &NewSubmission) -> Result<FormSubmission, StoreError> {
        let saved = FormSubmission {
            id: EntityId::new(FormSubmission::PREFIX),
            template_id: submission.template_id.clone(),
            data: submission.data.clone(),
            created: now(),
        };

        self.conn.execute(
            "INSERT INTO submissions (id, template_id, data, created) VALUES (?1, ?2, ?3, ?4)",
            params![
                saved.id.to_string(),
                saved.template_id.to_string(),
                serde_json::to_string(&saved.data)?,
                format_datetime(&saved.created),
            ],
        )?;

        Ok(saved)
    }

    fn find_submission(&self, id: &EntityId) -> Result<Option<FormSubmission>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM submissions WHERE id = ?1", SUBMISSION_COLUMNS),
                params![id.to_string()],
                SubmissionRow::from_row,
            )
            .optional()?;

        row.map(SubmissionRow::decode).transpose()
    }

    fn list_submissions(&self, template_id: &EntityId) -> Result<Vec<FormSubmission>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM submissions WHERE template_id = ?1 ORDER BY created DESC, id DESC",
            SUBMISSION_COLUMNS
        ))?;

        let rows = stmt
            .query_map(params![template_id.to_string()], SubmissionRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(SubmissionRow::decode).collect()
    }
}
