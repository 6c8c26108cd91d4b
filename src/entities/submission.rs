//! Form submission entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// A data record accepted against a template
///
/// The template is referenced by ID only; it is resolved by lookup, never owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    /// Unique identifier
    pub id: EntityId,

    /// The template this record was validated against
    pub template_id: EntityId,

    /// Submitted values keyed by field name
    pub data: Map<String, Value>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for FormSubmission {
    const PREFIX: EntityPrefix = EntityPrefix::Sub;
    const KIND: &'static str = "form submission";

    fn id(&self) -> &EntityId {
        &self.id
    }
}
