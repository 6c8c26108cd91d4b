//! Schema system - template definitions, the registry, and record validation

pub mod registry;
pub mod template;
pub mod validator;

pub use registry::{check_definition, TemplateRegistry};
pub use template::{DefinitionError, FieldSpec, TemplateDefinition};
pub use validator::{validate, ArrayMatching, RecordError, RecordValidator, ValueTag};
