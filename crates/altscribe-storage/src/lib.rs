//! Altscribe Storage Library
//!
//! Object storage abstraction for the ingest trigger. The trigger needs exactly
//! two capabilities from the store holding uploaded images: removing an object
//! and issuing a time-limited read URL for one.
//!
//! # Object keys
//!
//! Keys are container-relative (`shoes/red.png`, not
//! `images-description/shoes/red.png`). Keys must not be empty, contain `..`
//! or start with `/`.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-azure")]
pub mod azure;
pub mod traits;

// Re-export commonly used types
pub use altscribe_core::StorageBackend;
#[cfg(feature = "storage-azure")]
pub use azure::AzureBlobStorage;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
