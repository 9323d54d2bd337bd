use crate::keys::{encode_key, validate_object_key};
use crate::traits::{ObjectStorage, StorageError, StorageResult};
use crate::StorageBackend;
use altscribe_core::SignedAccessUrl;
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

/// Local filesystem storage implementation, for running the trigger without a
/// storage account. Objects live under `{base_path}/{container}/{key}`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
    container: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory (e.g., "/var/lib/altscribe/blobs")
    /// * `base_url` - Base URL the files are served from (e.g., "http://localhost:4000/blobs")
    /// * `container` - Sub-directory standing in for the blob container
    pub async fn new(
        base_path: impl Into<PathBuf>,
        base_url: String,
        container: String,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();
        let container_path = base_path.join(&container);

        fs::create_dir_all(&container_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                container_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
            container,
        })
    }

    fn key_to_path(&self, object_key: &str) -> StorageResult<PathBuf> {
        validate_object_key(object_key)?;
        Ok(self.base_path.join(&self.container).join(object_key))
    }

    fn generate_url(&self, object_key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.container,
            encode_key(object_key)
        )
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn delete(&self, object_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(object_key)?;
        let start = std::time::Instant::now();

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(object_key.to_string()));
            }
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        tracing::info!(
            path = %path.display(),
            key = %object_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    /// Local files carry no signature; the expiry is appended so the URL has
    /// the same shape as a signed one.
    async fn signed_read_url(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> StorageResult<SignedAccessUrl> {
        let path = self.key_to_path(object_key)?;
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(object_key.to_string()));
        }

        let expires_at = Utc::now().timestamp() + expires_in.as_secs() as i64;
        Ok(SignedAccessUrl::new(format!(
            "{}?expires={}",
            self.generate_url(object_key),
            expires_at
        )))
    }

    fn container(&self) -> &str {
        &self.container
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
