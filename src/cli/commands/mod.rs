//! CLI command implementations

pub mod completions;
pub mod init;
pub mod submission;
pub mod submit;
pub mod template;
