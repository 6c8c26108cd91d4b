//! Dynaform: template-driven form validation
//!
//! Callers define form templates (named, ordered lists of typed fields) and
//! submit data records that are checked against them before being stored.

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
