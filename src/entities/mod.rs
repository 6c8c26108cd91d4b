//! Entity type definitions
//!
//! - [`FormTemplate`] - A named, ordered list of typed field declarations
//! - [`FormSubmission`] - A data record that passed validation against a template

pub mod submission;
pub mod template;

pub use submission::FormSubmission;
pub use template::{FieldDefinition, FieldType, FormTemplate};
