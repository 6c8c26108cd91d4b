//! Error taxonomy for the template registry and submission flow

use miette::Diagnostic;
use thiserror::Error;

use crate::core::identity::IdParseError;
use crate::core::store::StoreError;
use crate::schema::validator::RecordError;

/// Errors surfaced to callers of the registry and service operations
///
/// Every variant except [`FormError::PersistenceFailure`] is a caller error
/// and carries enough detail to act on. Storage failures are logged where
/// they happen and surface here without their cause.
#[derive(Debug, Error, Diagnostic)]
pub enum FormError {
    #[error("Invalid form template: {0}")]
    #[diagnostic(code(dynaform::template::invalid))]
    InvalidTemplate(String),

    #[error("Invalid field type: {0}")]
    #[diagnostic(
        code(dynaform::template::invalid_field_type),
        help("Field types must be one of: string, number, boolean, array")
    )]
    InvalidFieldType(String),

    #[error("Invalid identifier '{input}': {source}")]
    #[diagnostic(code(dynaform::invalid_identifier))]
    InvalidIdentifier {
        input: String,
        #[source]
        source: IdParseError,
    },

    #[error("Form template not found for ID: {0}")]
    #[diagnostic(code(dynaform::template::not_found))]
    TemplateNotFound(String),

    #[error("Form submission not found for ID: {0}")]
    #[diagnostic(code(dynaform::submission::not_found))]
    SubmissionNotFound(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Record(#[from] RecordError),

    #[error("An unexpected error occurred")]
    #[diagnostic(
        code(dynaform::internal),
        help("Run with --verbose or DYNAFORM_LOG=debug for details")
    )]
    PersistenceFailure,
}

impl FormError {
    /// Whether the error was caused by the caller's input rather than the system
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, FormError::PersistenceFailure)
    }

    pub(crate) fn invalid_identifier(input: &str, source: IdParseError) -> Self {
        FormError::InvalidIdentifier {
            input: input.to_string(),
            source,
        }
    }

    /// Log a storage failure with its context and hide it behind the generic kind
    pub(crate) fn persistence(context: impl std::fmt::Display, error: StoreError) -> Self {
        tracing::error!(error = %error, "{}", context);
        FormError::PersistenceFailure
    }
}
