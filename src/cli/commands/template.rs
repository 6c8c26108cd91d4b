//! `dynaform template` command - Form template management

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{format_short_id, truncate_str};
use crate::cli::output::{self, print_entity, print_list};
use crate::cli::workspace::Workspace;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::FormTemplate;
use crate::schema::template::{FieldSpec, TemplateDefinition};

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Create a new form template
    New(NewArgs),

    /// Show a template's fields
    Show(ShowArgs),

    /// List all templates
    List,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Template name
    #[arg(long, short = 'n', required_unless_present = "file")]
    pub name: Option<String>,

    /// Field declaration, repeatable (e.g. fullName:string:required, age:number)
    #[arg(long = "field", value_name = "NAME:TYPE[:required]")]
    pub fields: Vec<String>,

    /// Read the definition from a YAML or JSON file instead
    #[arg(long, conflicts_with_all = ["name", "fields"])]
    pub file: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Template ID (TPL-...)
    pub id: String,
}

pub fn run(cmd: TemplateCommands, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    match cmd {
        TemplateCommands::New(args) => run_new(&ws, args, global)?,
        TemplateCommands::Show(args) => run_show(&ws, args, global)?,
        TemplateCommands::List => run_list(&ws, global)?,
    }
    ws.close()
}

fn definition_from_args(args: NewArgs) -> Result<TemplateDefinition> {
    if let Some(path) = args.file {
        return TemplateDefinition::from_file(&path).map_err(|e| miette::miette!("{}", e));
    }

    let name = args
        .name
        .ok_or_else(|| miette::miette!("Either --name or --file is required"))?;
    let fields = args
        .fields
        .iter()
        .map(|spec| FieldSpec::parse_inline(spec))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| miette::miette!("{}", e))?;

    Ok(TemplateDefinition { name, fields })
}

fn run_new(ws: &Workspace, args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let definition = definition_from_args(args)?;
    let template = ws.service.create_from_definition(&definition)?;

    if global.quiet {
        println!("{}", template.id);
        return Ok(());
    }

    if !print_entity(
        output::TEMPLATE_CREATED,
        &template,
        ws.format(global, OutputFormat::Auto),
    )? {
        println!(
            "{} Created form template {} ({}, {} field(s))",
            style("✓").green(),
            style(&template.id.to_string()).cyan(),
            template.name,
            template.fields.len()
        );
    }
    Ok(())
}

fn run_show(ws: &Workspace, args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let template = ws.service.get_template(&args.id)?;

    if !print_entity(
        output::TEMPLATE_RETRIEVED,
        &template,
        ws.format(global, OutputFormat::Auto),
    )? {
        print_template(&template);
    }
    Ok(())
}

fn print_template(template: &FormTemplate) {
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}",
        style("ID").bold(),
        style(&template.id.to_string()).cyan()
    );
    println!("{}: {}", style("Name").bold(), style(&template.name).yellow());
    println!(
        "{}: {}",
        style("Created").bold(),
        template.created.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{:<24} {:<10} {}",
        style("FIELD").bold(),
        style("TYPE").bold(),
        style("REQUIRED").bold()
    );
    for field in &template.fields {
        println!(
            "{:<24} {:<10} {}",
            truncate_str(&field.name, 24),
            field.field_type,
            if field.required { "yes" } else { "no" }
        );
    }
}

fn run_list(ws: &Workspace, global: &GlobalOpts) -> Result<()> {
    let templates = ws.service.list_templates()?;
    let format = ws.format(global, OutputFormat::Tsv);

    if templates.is_empty() {
        match format {
            OutputFormat::Json => println!("{}", output::Envelope::new(output::TEMPLATES_LISTED, &templates).to_json()?),
            OutputFormat::Yaml => println!("[]"),
            OutputFormat::Id => {}
            _ => {
                println!("No form templates found.");
                println!();
                println!("Create one with: {}", style("dynaform template new").yellow());
            }
        }
        return Ok(());
    }

    if print_list(output::TEMPLATES_LISTED, &templates, format)? {
        return Ok(());
    }

    println!(
        "{:<16} {:<32} {:<7} {:<9} {}",
        style("ID").bold(),
        style("NAME").bold(),
        style("FIELDS").bold(),
        style("REQUIRED").bold(),
        style("CREATED").bold()
    );
    println!("{}", "-".repeat(86));

    for template in &templates {
        println!(
            "{:<16} {:<32} {:<7} {:<9} {}",
            format_short_id(&template.id),
            truncate_str(&template.name, 30),
            template.fields.len(),
            template.required_count(),
            template.created.format("%Y-%m-%d %H:%M")
        );
    }

    if !global.quiet {
        println!();
        println!("{} template(s) found", style(templates.len()).cyan());
    }
    Ok(())
}
