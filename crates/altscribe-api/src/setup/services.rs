use crate::state::AppState;
use altscribe_core::Config;
use altscribe_db::create_description_store;
use altscribe_storage::create_storage;
use altscribe_trigger::BlobIngestHandler;
use altscribe_vision::{AzureOpenAiConfig, AzureOpenAiDescriber};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Build the storage, document store and model clients once for the process.
pub async fn initialize_services(config: &Config) -> Result<AppState> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize object storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        container = %storage.container(),
        "Object storage initialized"
    );

    let store = create_description_store(config)
        .context("Failed to initialize description store")?;
    tracing::info!(
        backend = store.backend_name(),
        database = %config.cosmos_database(),
        container = %config.cosmos_container(),
        "Description store initialized"
    );

    let describer = AzureOpenAiDescriber::new(AzureOpenAiConfig::from_config(config)?)?;
    tracing::info!(
        deployment = %config.openai_deployment(),
        api_version = %config.openai_api_version(),
        "Description generator initialized"
    );

    let handler = BlobIngestHandler::new(storage, store, Arc::new(describer));
    Ok(AppState::new(handler))
}
