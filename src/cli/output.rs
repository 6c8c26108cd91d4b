//! Output rendering shared by commands
//!
//! JSON output wraps the payload in a `{ message, data }` envelope so that
//! scripted callers get the same shape for every command.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::Entity;

pub const TEMPLATE_CREATED: &str = "Form template created successfully";
pub const TEMPLATE_RETRIEVED: &str = "Form template retrieved successfully";
pub const TEMPLATES_LISTED: &str = "Form templates retrieved successfully";
pub const DATA_SUBMITTED: &str = "Form data submitted successfully";
pub const DATA_VALID: &str = "Form data is valid";
pub const SUBMISSION_RETRIEVED: &str = "Form submission retrieved successfully";
pub const SUBMISSIONS_LISTED: &str = "Form submissions retrieved successfully";

/// Response envelope for JSON output
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub message: &'a str,
    pub data: &'a T,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    pub fn new(message: &'a str, data: &'a T) -> Self {
        Self { message, data }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).into_diagnostic()
    }
}

/// Print a single entity in a machine format, returning false when the
/// caller should render its own human-readable view instead
pub fn print_entity<T: Entity>(message: &str, entity: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => println!("{}", Envelope::new(message, entity).to_json()?),
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(entity).into_diagnostic()?),
        OutputFormat::Id => println!("{}", entity.id()),
        OutputFormat::Auto | OutputFormat::Tsv => return Ok(false),
    }
    Ok(true)
}

/// Print a list of entities in a machine format, returning false when the
/// caller should render its own table instead
pub fn print_list<T: Entity>(message: &str, entities: &[T], format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => println!("{}", Envelope::new(message, &entities).to_json()?),
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&entities).into_diagnostic()?),
        OutputFormat::Id => {
            for entity in entities {
                println!("{}", entity.id());
            }
        }
        OutputFormat::Auto | OutputFormat::Tsv => return Ok(false),
    }
    Ok(true)
}
