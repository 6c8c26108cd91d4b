//! Per-invocation wiring: project, configuration, and an open form service

use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, FormService, Project, SqliteStore};

/// Everything a command needs, opened at the start of a command and closed at the end
pub struct Workspace {
    pub config: Config,
    pub service: FormService<SqliteStore>,
}

impl Workspace {
    /// Discover the project, load layered config, and open the store
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let project = discover_project(global).map_err(|e| miette::miette!("{}", e))?;
        let config = Config::load(Some(&project))?;

        let db_path = config.database_path(&project);
        let store = SqliteStore::open(&db_path).into_diagnostic()?;
        let service = FormService::new(store, config.array_matching());

        Ok(Self { config, service })
    }

    /// Resolve `auto` against the configured default, then against the command's own default
    pub fn format(&self, global: &GlobalOpts, fallback: OutputFormat) -> OutputFormat {
        let configured = match global.format {
            OutputFormat::Auto => self
                .config
                .default_format
                .as_deref()
                .and_then(|f| f.parse().ok())
                .unwrap_or(OutputFormat::Auto),
            f => f,
        };

        match configured {
            OutputFormat::Auto => fallback,
            f => f,
        }
    }

    /// Close the store, surfacing any error from the final flush
    pub fn close(self) -> Result<()> {
        self.service.into_store().close().into_diagnostic()
    }
}

/// Find the project from `--project` or the current directory
pub fn discover_project(global: &GlobalOpts) -> Result<Project, crate::core::ProjectError> {
    match &global.project {
        Some(path) => Project::discover_from(path),
        None => Project::discover(),
    }
}
