//! Altscribe Core Library
//!
//! This crate provides the domain model, error types, configuration and the
//! extension classifier shared by every Altscribe component.

pub mod classify;
pub mod config;
pub mod connection_string;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use classify::{file_extension, is_allowed_extension};
pub use config::{BaseConfig, Config, TriggerConfig};
pub use connection_string::StorageConnectionString;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    DescriptionRecord, GeneratedDescription, IngestEvent, IngestOutcome, SignedAccessUrl,
};
pub use storage_types::{DocumentStoreBackend, StorageBackend};
