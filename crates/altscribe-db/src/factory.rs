#[cfg(feature = "store-cosmos")]
use crate::CosmosDescriptionStore;
use crate::{DescriptionStore, InMemoryDescriptionStore, StoreError, StoreResult};
use altscribe_core::{Config, DocumentStoreBackend};
use std::sync::Arc;

/// Create the document store selected by configuration
pub fn create_description_store(config: &Config) -> StoreResult<Arc<dyn DescriptionStore>> {
    match config.document_store_backend() {
        #[cfg(feature = "store-cosmos")]
        DocumentStoreBackend::Cosmos => {
            let endpoint = config
                .cosmos_endpoint()
                .ok_or_else(|| StoreError::ConfigError("ACCOUNT_URI not configured".to_string()))?;
            let key = config
                .cosmos_key()
                .ok_or_else(|| StoreError::ConfigError("ACCOUNT_KEY not configured".to_string()))?;

            let store = CosmosDescriptionStore::new(
                endpoint,
                key,
                config.cosmos_database().to_string(),
                config.cosmos_container().to_string(),
            )?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-cosmos"))]
        DocumentStoreBackend::Cosmos => Err(StoreError::ConfigError(
            "Cosmos DB backend not available (store-cosmos feature not enabled)".to_string(),
        )),

        DocumentStoreBackend::Memory => {
            tracing::warn!("Using in-memory description store; descriptions are lost on restart");
            Ok(Arc::new(InMemoryDescriptionStore::new()))
        }
    }
}
