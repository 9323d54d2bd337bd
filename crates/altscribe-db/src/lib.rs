//! Altscribe document store
//!
//! Persistence of generated alt-text descriptions. One document per image
//! file name; the file name is both the document id and its partition key.
//! Documents are only ever created, never replaced: uniqueness of the id is
//! what keeps concurrent invocations from storing two descriptions.

#[cfg(feature = "store-cosmos")]
pub mod cosmos;
pub mod factory;
pub mod memory;
pub mod traits;

#[cfg(feature = "store-cosmos")]
pub use cosmos::CosmosDescriptionStore;
pub use factory::create_description_store;
pub use memory::InMemoryDescriptionStore;
pub use traits::{CreateOutcome, DescriptionStore, Lookup, StoreError, StoreResult};
