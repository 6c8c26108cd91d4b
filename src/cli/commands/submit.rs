//! `dynaform submit` command - Validate and store a data record

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{parse_record, read_record};
use crate::cli::output::{self, print_entity, Envelope};
use crate::cli::workspace::Workspace;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Template ID the record is submitted against (TPL-...)
    pub template_id: String,

    /// Record as an inline JSON object
    #[arg(long, short = 'd', required_unless_present = "file")]
    pub data: Option<String>,

    /// Read the record from a JSON or YAML file ("-" for stdin)
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,

    /// Validate only; do not store the record
    #[arg(long)]
    pub check: bool,
}

pub fn run(args: SubmitArgs, global: &GlobalOpts) -> Result<()> {
    let record = match (&args.data, &args.file) {
        (Some(json), _) => parse_record(json)?,
        (None, Some(path)) => read_record(path)?,
        (None, None) => return Err(miette::miette!("Either --data or --file is required")),
    };

    let ws = Workspace::open(global)?;
    let format = ws.format(global, OutputFormat::Auto);

    if args.check {
        let template = ws.service.check(&args.template_id, &record)?;
        match format {
            OutputFormat::Json => println!("{}", Envelope::new(output::DATA_VALID, &record).to_json()?),
            OutputFormat::Id => println!("{}", template.id),
            _ if global.quiet => {}
            _ => println!(
                "{} Record is valid for {} ({})",
                style("✓").green(),
                style(&template.id.to_string()).cyan(),
                template.name
            ),
        }
        return ws.close();
    }

    let submission = ws.service.submit(&args.template_id, record)?;

    if global.quiet {
        println!("{}", submission.id);
    } else if !print_entity(output::DATA_SUBMITTED, &submission, format)? {
        println!(
            "{} Submitted {} against {}",
            style("✓").green(),
            style(&submission.id.to_string()).cyan(),
            submission.template_id
        );
    }

    ws.close()
}
