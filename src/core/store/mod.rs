//! SQLite-backed storage for templates and submissions
//!
//! The registry and service never reach for a global handle: a store is
//! opened at startup, passed in at construction, and closed at shutdown.
//!
//! - Templates and submissions are written by value; the store assigns
//!   the identifier and creation timestamp
//! - Each write is a single INSERT, so an entity is either fully stored or absent
//! - A successful insert is visible to the next find on the same store

mod queries;
mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::Connection;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::identity::EntityId;
use crate::entities::{FieldDefinition, FormSubmission, FormTemplate};

/// Current schema version - an older database is migrated by recreating tables
const SCHEMA_VERSION: i32 = 1;

/// A template ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

/// A validated record ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub template_id: EntityId,
    pub data: Map<String, Value>,
}

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to encode or decode stored JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt row in '{table}': {message}")]
    Corrupt { table: &'static str, message: String },

    #[error("failed to prepare database location {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The storage collaborator the registry and submission flow depend on
#[cfg_attr(test, mockall::automock)]
pub trait FormStore {
    /// Persist a template, assigning its ID
    fn insert_template(&self, template: &NewTemplate) -> Result<FormTemplate, StoreError>;

    /// Find a template by ID
    fn find_template(&self, id: &EntityId) -> Result<Option<FormTemplate>, StoreError>;

    /// List all templates, newest first
    fn list_templates(&self) -> Result<Vec<FormTemplate>, StoreError>;

    /// Persist a submission, assigning its ID
    fn insert_submission(&self, submission: &NewSubmission) -> Result<FormSubmission, StoreError>;

    /// Find a submission by ID
    fn find_submission(&self, id: &EntityId) -> Result<Option<FormSubmission>, StoreError>;

    /// List the submissions recorded against a template, newest first
    fn list_submissions(&self, template_id: &EntityId) -> Result<Vec<FormSubmission>, StoreError>;
}

/// The SQLite store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database file, creating its parent directory if needed
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let mut store = Self { conn };
        store.prepare()?;
        tracing::debug!(path = %path.display(), "opened form store");
        Ok(store)
    }

    /// Open a private in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.prepare()?;
        Ok(store)
    }

    /// Close the underlying connection, flushing pending writes
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
        tracing::debug!("closed form store");
        Ok(())
    }

    fn prepare(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        if self.needs_schema_rebuild()? {
            self.reinitialize_schema()?;
        }
        Ok(())
    }
}

/// Creation timestamp at the precision the store keeps
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp so that lexical order matches chronological order
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_datetime(table: &'static str, s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt {
            table,
            message: format!("bad timestamp '{}': {}", s, e),
        })
}

fn parse_id(table: &'static str, s: &str) -> Result<EntityId, StoreError> {
    EntityId::parse(s).map_err(|e| StoreError::Corrupt {
        table,
        message: e.to_string(),
    })
}
