#[cfg(feature = "storage-azure")]
use crate::AzureBlobStorage;
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{ObjectStorage, StorageBackend, StorageError, StorageResult};
use altscribe_core::Config;
use std::sync::Arc;

/// Create the object storage backend selected by configuration, bound to the
/// images container.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn ObjectStorage>> {
    let container = config.images_container().to_string();

    match config.storage_backend() {
        #[cfg(feature = "storage-azure")]
        StorageBackend::Azure => {
            let connection = config.storage_connection().ok_or_else(|| {
                StorageError::ConfigError("images06_STORAGE not configured".to_string())
            })?;
            let key = config.signing_key().ok_or_else(|| {
                StorageError::ConfigError("key_storage_account not configured".to_string())
            })?;

            let storage = AzureBlobStorage::new(connection, key, container)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-azure"))]
        StorageBackend::Azure => Err(StorageError::ConfigError(
            "Azure storage backend not available (storage-azure feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, base_url.to_string(), container).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
