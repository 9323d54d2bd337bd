//! Document store abstraction trait

use altscribe_core::DescriptionRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store request failed: {0}")]
    Request(String),

    #[error("Document store returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid document: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a point read. Absence is a value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(DescriptionRecord),
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Outcome of a create. A conflicting id is reported, never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Conflict,
}

/// Capability the ingest trigger consumes from the document store.
#[async_trait]
pub trait DescriptionStore: Send + Sync {
    /// Read the document whose id and partition key are both `id`.
    async fn point_read(&self, id: &str) -> StoreResult<Lookup>;

    /// Insert `record` unless a document with the same id exists.
    async fn create_item(&self, record: &DescriptionRecord) -> StoreResult<CreateOutcome>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
