//! Core module - fundamental types, storage, and the submission flow

pub mod config;
pub mod entity;
pub mod error;
pub mod identity;
pub mod project;
pub mod service;
pub mod store;

pub use config::{Config, ConfigError};
pub use entity::Entity;
pub use error::FormError;
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use project::{Project, ProjectError};
pub use service::FormService;
pub use store::{FormStore, NewSubmission, NewTemplate, SqliteStore, StoreError};
