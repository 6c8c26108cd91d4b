//! `dynaform submission` command - Inspect accepted submissions

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{format_short_id, format_value, truncate_str};
use crate::cli::output::{self, print_entity, print_list, Envelope};
use crate::cli::workspace::Workspace;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::FormSubmission;

#[derive(Subcommand, Debug)]
pub enum SubmissionCommands {
    /// Show a submission's data
    Show {
        /// Submission ID (SUB-...)
        id: String,
    },

    /// List submissions recorded against a template
    List {
        /// Template ID (TPL-...)
        template_id: String,
    },
}

pub fn run(cmd: SubmissionCommands, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    match cmd {
        SubmissionCommands::Show { id } => run_show(&ws, &id, global)?,
        SubmissionCommands::List { template_id } => run_list(&ws, &template_id, global)?,
    }
    ws.close()
}

fn run_show(ws: &Workspace, id: &str, global: &GlobalOpts) -> Result<()> {
    let submission = ws.service.get_submission(id)?;

    if !print_entity(
        output::SUBMISSION_RETRIEVED,
        &submission,
        ws.format(global, OutputFormat::Auto),
    )? {
        print_submission(&submission);
    }
    Ok(())
}

fn print_submission(submission: &FormSubmission) {
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}",
        style("ID").bold(),
        style(&submission.id.to_string()).cyan()
    );
    println!("{}: {}", style("Template").bold(), submission.template_id);
    println!(
        "{}: {}",
        style("Created").bold(),
        submission.created.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", style("─".repeat(60)).dim());
    for (key, value) in &submission.data {
        println!("{:<24} {}", style(key).bold(), format_value(value));
    }
}

fn run_list(ws: &Workspace, template_id: &str, global: &GlobalOpts) -> Result<()> {
    let submissions = ws.service.list_submissions(template_id)?;
    let format = ws.format(global, OutputFormat::Tsv);

    if submissions.is_empty() {
        match format {
            OutputFormat::Json => println!("{}", Envelope::new(output::SUBMISSIONS_LISTED, &submissions).to_json()?),
            OutputFormat::Yaml => println!("[]"),
            OutputFormat::Id => {}
            _ => println!("No submissions found for {}.", template_id.trim()),
        }
        return Ok(());
    }

    if print_list(output::SUBMISSIONS_LISTED, &submissions, format)? {
        return Ok(());
    }

    println!(
        "{:<16} {:<17} {}",
        style("ID").bold(),
        style("CREATED").bold(),
        style("DATA").bold()
    );
    println!("{}", "-".repeat(86));

    for submission in &submissions {
        let data = serde_json::Value::Object(submission.data.clone()).to_string();
        println!(
            "{:<16} {:<17} {}",
            format_short_id(&submission.id),
            submission.created.format("%Y-%m-%d %H:%M"),
            truncate_str(&data, 50)
        );
    }

    if !global.quiet {
        println!();
        println!("{} submission(s) found", style(submissions.len()).cyan());
    }
    Ok(())
}
