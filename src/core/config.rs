//! Configuration management with layered hierarchy

use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::Project;
use crate::schema::validator::ArrayMatching;

/// Dynaform configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database file override
    pub database: Option<PathBuf>,

    /// How `array` fields match submitted values
    pub array_matching: Option<ArrayMatching>,

    /// Default output format
    pub default_format: Option<String>,

    /// Log filter used when DYNAFORM_LOG is unset
    pub log_level: Option<String>,
}

/// A configuration source that exists but cannot be used
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    #[diagnostic(code(dynaform::config::read))]
    Read { path: PathBuf, message: String },

    #[error("invalid config {path}: {message}")]
    #[diagnostic(
        code(dynaform::config::parse),
        help("Fix the file or remove the offending key; no setting from it was applied")
    )]
    Parse { path: PathBuf, message: String },

    #[error("invalid {key} value '{value}': {message}")]
    #[diagnostic(code(dynaform::config::env))]
    Env {
        key: &'static str,
        value: String,
        message: String,
    },
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// A missing file is skipped; a file or variable that is present but
    /// malformed is an error rather than a silently dropped layer.
    pub fn load(project: Option<&Project>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/dynaform/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path)? {
                config.merge(global);
            }
        }

        // 3. Project config (.dynaform/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::project_layer(project)? {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dynaform")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Read the project config; relative database paths resolve against the project root
    fn project_layer(project: &Project) -> Result<Option<Config>, ConfigError> {
        let Some(mut config) = Self::read_file(&project.config_path())? else {
            return Ok(None);
        };
        config.database = config.database.map(|db| {
            if db.is_relative() {
                project.root().join(db)
            } else {
                db
            }
        });
        Ok(Some(config))
    }

    fn read_file(path: &Path) -> Result<Option<Config>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        // A file holding only comments parses as null
        if contents.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(Some(Config::default()));
        }

        serde_yml::from_str::<Config>(&contents)
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(db) = lookup("DYNAFORM_DATABASE").filter(|s| !s.is_empty()) {
            self.database = Some(PathBuf::from(db));
        }
        if let Some(mode) = lookup("DYNAFORM_ARRAY_MATCHING").filter(|s| !s.is_empty()) {
            let parsed = mode.parse().map_err(|message| ConfigError::Env {
                key: "DYNAFORM_ARRAY_MATCHING",
                value: mode.clone(),
                message,
            })?;
            self.array_matching = Some(parsed);
        }
        if let Some(format) = lookup("DYNAFORM_FORMAT").filter(|s| !s.is_empty()) {
            self.default_format = Some(format);
        }
        Ok(())
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.array_matching.is_some() {
            self.array_matching = other.array_matching;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }

    /// Database location, falling back to the project's default
    pub fn database_path(&self, project: &Project) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| project.database_path())
    }

    /// Array matching mode, defaulting to sequence matching
    pub fn array_matching(&self) -> ArrayMatching {
        self.array_matching.unwrap_or_default()
    }
}
