//! Entity trait - common interface for persisted entity types

use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};

/// Common trait for all persisted form entities
pub trait Entity: Serialize + DeserializeOwned {
    /// The entity type prefix
    const PREFIX: EntityPrefix;

    /// Human-readable kind, used in log lines
    const KIND: &'static str;

    /// Get the entity's unique ID
    fn id(&self) -> &EntityId;
}
