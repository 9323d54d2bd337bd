//! Blob ingest trigger
//!
//! [`BlobIngestHandler`] runs once per uploaded object. Disallowed file types
//! are deleted; allowed images get a French alt-text description stored
//! unless one already exists for the file name.

mod handler;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use handler::BlobIngestHandler;
