//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

use crate::core::identity::EntityId;

/// Format an EntityId for display, truncating if too long
///
/// IDs longer than 16 characters are truncated to 13 chars with "..." suffix.
pub fn format_short_id(id: &EntityId) -> String {
    let s = id.to_string();
    if s.len() > 16 {
        format!("{}...", &s[..13])
    } else {
        s
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render a JSON value compactly for a table cell
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a data record from inline JSON
pub fn parse_record(json: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| miette::miette!("Submitted data is not valid JSON: {}", e))?;
    into_record(value)
}

/// Read a data record from a JSON or YAML file, or stdin when the path is "-"
pub fn read_record(path: &Path) -> Result<Map<String, Value>> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?
    };

    // JSON is a subset of YAML, so one parser covers both
    let value: Value = serde_yml::from_str(&content)
        .map_err(|e| miette::miette!("Failed to parse {}: {}", path.display(), e))?;
    into_record(value)
}

fn into_record(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(miette::miette!(
            "Submitted data must be an object of field values, got: {}",
            other
        )),
    }
}
