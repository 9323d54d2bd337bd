//! Test helpers for ingest handler tests
//!
//! Recording mock implementations of the three backend traits. They never
//! touch the network, so handler behavior can be asserted through call
//! counts and the contents of the in-memory store.

pub mod fixtures;
pub mod mock_generator;
pub mod mock_storage;
pub mod mock_store;

pub use fixtures::*;
pub use mock_generator::MockGenerator;
pub use mock_storage::MockStorage;
pub use mock_store::MockDescriptionStore;

use crate::BlobIngestHandler;
use std::sync::Arc;

/// Handler wired to the given mocks.
pub fn handler_with(
    storage: &MockStorage,
    store: &MockDescriptionStore,
    generator: &MockGenerator,
) -> BlobIngestHandler {
    BlobIngestHandler::new(
        Arc::new(storage.clone()),
        Arc::new(store.clone()),
        Arc::new(generator.clone()),
    )
}
