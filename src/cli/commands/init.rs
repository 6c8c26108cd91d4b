//! `dynaform init` command - Initialize a new project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::config::Config;
use crate::core::project::{Project, ProjectError};
use crate::core::store::SqliteStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Rewrite the default config even if .dynaform/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    // Create directory if it doesn't exist
    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            // Create the database up front so the first command finds a ready schema
            let config = Config::load(Some(&project))?;
            let db_path = config.database_path(&project);
            SqliteStore::open(&db_path)
                .and_then(SqliteStore::close)
                .into_diagnostic()?;

            println!(
                "{} Initialized dynaform project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!("  Config:   {}", project.config_path().display());
            println!("  Database: {}", db_path.display());
            println!();
            println!("Next steps:");
            println!(
                "  {} Define a form template",
                style("dynaform template new --name Visitor --field fullName:string:required").yellow()
            );
            println!(
                "  {} Submit a record",
                style("dynaform submit <TEMPLATE_ID> --data '{\"fullName\": \"Ana\"}'").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} dynaform project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("dynaform init --force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
