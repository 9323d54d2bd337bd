//! Storage abstraction trait
//!
//! This module defines the narrow capability the ingest trigger consumes from
//! the object store.

use crate::StorageBackend;
use altscribe_core::SignedAccessUrl;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("URL signing failed: {0}")]
    SigningFailed(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object storage capability used by the ingest trigger.
///
/// Every backend is bound to a single container; keys are relative to it.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Delete an object.
    ///
    /// Returns [`StorageError::NotFound`] when the object does not exist so
    /// callers can tell a no-op from a removal.
    async fn delete(&self, object_key: &str) -> StorageResult<()>;

    /// Issue a read-only URL for one object that stops working after `expires_in`.
    ///
    /// Signing is local; no request is sent to the store.
    async fn signed_read_url(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> StorageResult<SignedAccessUrl>;

    /// Container this backend is bound to.
    fn container(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
