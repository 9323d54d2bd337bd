use crate::keys::validate_object_key;
use crate::traits::{ObjectStorage, StorageError, StorageResult};
use crate::StorageBackend;
use altscribe_core::{SignedAccessUrl, StorageConnectionString};
use async_trait::async_trait;
use http::Method;
use object_store::azure::{MicrosoftAzure, MicrosoftAzureBuilder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, Result as ObjectResult};
use std::time::Duration;

/// Azure Blob Storage implementation bound to one container
pub struct AzureBlobStorage {
    store: MicrosoftAzure,
    account: String,
    container: String,
}

impl AzureBlobStorage {
    /// Create a new AzureBlobStorage instance
    ///
    /// # Arguments
    /// * `connection` - Parsed storage account connection string
    /// * `account_key` - Shared key used to authorize deletes and sign read URLs
    /// * `container` - Container holding the uploaded images
    pub fn new(
        connection: &StorageConnectionString,
        account_key: &str,
        container: String,
    ) -> StorageResult<Self> {
        let mut builder = MicrosoftAzureBuilder::new()
            .with_account(connection.account_name.clone())
            .with_access_key(account_key.to_string())
            .with_container_name(container.clone());

        // Emulators, custom domains and sovereign clouds need an explicit endpoint.
        if !connection.uses_public_endpoint() {
            let endpoint = connection.blob_service_url();
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(AzureBlobStorage {
            store,
            account: connection.account_name.clone(),
            container,
        })
    }
}

/// Blob names are used verbatim; the URL layer does the only round of encoding.
fn blob_path(object_key: &str) -> StorageResult<Path> {
    validate_object_key(object_key)?;
    Path::parse(object_key).map_err(|e| StorageError::InvalidKey(e.to_string()))
}

#[async_trait]
impl ObjectStorage for AzureBlobStorage {
    async fn delete(&self, object_key: &str) -> StorageResult<()> {
        let location = blob_path(object_key)?;
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(object_key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    account = %self.account,
                    container = %self.container,
                    key = %object_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Blob delete failed"
                );
                StorageError::DeleteFailed(other.to_string())
            }
        })?;

        tracing::info!(
            account = %self.account,
            container = %self.container,
            key = %object_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob delete successful"
        );

        Ok(())
    }

    async fn signed_read_url(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> StorageResult<SignedAccessUrl> {
        let location = blob_path(object_key)?;
        let url_result: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await;

        let url = url_result
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?
            .to_string();

        tracing::debug!(
            container = %self.container,
            key = %object_key,
            expires_in_secs = expires_in.as_secs(),
            "Issued signed read URL"
        );

        Ok(SignedAccessUrl::new(url))
    }

    fn container(&self) -> &str {
        &self.container
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Azure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altscribe_core::GeneratedDescription;

    const CONNECTION: &str = "DefaultEndpointsProtocol=https;AccountName=images06;AccountKey=c2VjcmV0LWtleQ==;EndpointSuffix=core.windows.net";

    fn storage() -> AzureBlobStorage {
        let cs = StorageConnectionString::parse(CONNECTION).unwrap();
        AzureBlobStorage::new(&cs, "c2VjcmV0LWtleQ==", "images-description".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_signed_url_is_read_only_and_scoped() {
        let url = storage()
            .signed_read_url("shoes/red.png", Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(
            url.canonical(),
            "https://images06.blob.core.windows.net/images-description/shoes/red.png"
        );
        let query = url.as_str().split_once('?').map(|(_, q)| q).unwrap_or_default();
        assert!(query.contains("sp=r"), "expected read permission in {query}");
        assert!(query.contains("sig="));
        assert!(query.contains("se="));
    }

    #[tokio::test]
    async fn test_signed_url_keeps_reserved_characters_in_blob_names() {
        let storage = storage();

        for name in ["photo~1.png", "product[1].png", "50%off.png"] {
            let url = storage
                .signed_read_url(name, Duration::from_secs(3600))
                .await
                .unwrap();
            let canonical = url.canonical();
            assert!(
                canonical.starts_with(
                    "https://images06.blob.core.windows.net/images-description/"
                ),
                "{canonical}"
            );

            let generated = GeneratedDescription {
                url: canonical.to_string(),
                description: "Produit".to_string(),
            };
            assert_eq!(generated.id(), name);
        }
    }

    #[tokio::test]
    async fn test_signed_url_uses_connection_string_endpoint_suffix() {
        let cs = StorageConnectionString::parse(
            "DefaultEndpointsProtocol=https;AccountName=images06;AccountKey=c2VjcmV0LWtleQ==;EndpointSuffix=core.chinacloudapi.cn",
        )
        .unwrap();
        let storage =
            AzureBlobStorage::new(&cs, "c2VjcmV0LWtleQ==", "images-description".to_string())
                .unwrap();

        let url = storage
            .signed_read_url("a.png", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            url.canonical(),
            "https://images06.blob.core.chinacloudapi.cn/images-description/a.png"
        );
    }

    #[tokio::test]
    async fn test_invalid_keys_rejected_before_signing() {
        let storage = storage();
        let result = storage.signed_read_url("", Duration::from_secs(60)).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        let result = storage.delete("../other/blob.png").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
