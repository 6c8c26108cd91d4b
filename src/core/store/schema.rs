//! Database schema initialization

use rusqlite::{params, OptionalExtension};

use super::{SqliteStore, StoreError, SCHEMA_VERSION};

impl SqliteStore {
    /// Check if schema version matches current version
    ///
    /// Only a missing version table or row means "rebuild"; any other read
    /// failure (e.g. a locked database) is propagated.
    pub(super) fn needs_schema_rebuild(&self) -> Result<bool, StoreError> {
        let has_table: bool = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
            [],
            |row| row.get(0),
        )?;
        if !has_table {
            return Ok(true);
        }

        let current_version: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(current_version != Some(SCHEMA_VERSION))
    }

    /// Create tables for an empty database or one written by an unknown version
    ///
    /// Only version 0 (no schema at all) exists before this one, so there is
    /// nothing to carry over.
    pub(super) fn reinitialize_schema(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            r#"
            DROP TABLE IF EXISTS schema_version;

            CREATE TABLE schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Form templates; fields are stored as a JSON array in declaration order
            CREATE TABLE IF NOT EXISTS templates (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                fields TEXT NOT NULL,
                created TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_templates_created ON templates(created);

            -- Accepted submissions; data is stored as a JSON object
            CREATE TABLE IF NOT EXISTS submissions (
                id TEXT PRIMARY KEY,
                template_id TEXT NOT NULL,
                data TEXT NOT NULL,
                created TEXT NOT NULL,
                FOREIGN KEY (template_id) REFERENCES templates(id)
            );
            CREATE INDEX IF NOT EXISTS idx_submissions_template ON submissions(template_id);
            "#,
        )?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        tx.commit()?;
        Ok(())
    }
}
