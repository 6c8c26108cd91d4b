//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project marker directory
pub const PROJECT_DIR: &str = ".dynaform";

/// Database file within the project directory
const DATABASE_FILE: &str = "forms.db";

/// Represents a dynaform project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .dynaform/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::write_structure(root)
    }

    /// Force initialization even if .dynaform/ exists
    ///
    /// Rewrites the default config; an existing database is kept.
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_structure(root)
    }

    fn write_structure(root: PathBuf) -> Result<Self, ProjectError> {
        let dir = root.join(PROJECT_DIR);
        std::fs::create_dir_all(&dir).map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# Dynaform Project Configuration

# Database file (default: .dynaform/forms.db)
# database: ""

# How values are matched against fields declared as `array`:
#   sequence - a JSON array satisfies an array field
#   legacy   - arrays are tagged "object", so array fields reject every value
# array_matching: sequence

# Default output format (auto, yaml, json, tsv, id)
# default_format: auto

# Log filter when DYNAFORM_LOG is unset (error, warn, info, debug, trace)
# log_level: warn
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .dynaform configuration directory
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Get the project config file path
    pub fn config_path(&self) -> PathBuf {
        self.data_dir().join("config.yaml")
    }

    /// Get the default database path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join(DATABASE_FILE)
    }
}

/// Errors related to project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a dynaform project (searched from {searched_from}). Run 'dynaform init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("dynaform project already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    IoError(String),
}
