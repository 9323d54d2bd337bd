//! Mock object storage recording every call

use super::fixtures::{canonical_url, TEST_CONTAINER};
use altscribe_core::{SignedAccessUrl, StorageBackend};
use altscribe_storage::{ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockStorage {
    objects: Arc<Mutex<HashSet<String>>>,
    delete_calls: Arc<Mutex<Vec<String>>>,
    sign_calls: Arc<Mutex<Vec<(String, Duration)>>>,
    fail_deletes: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delete fails with a backend error.
    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    /// Place an object in the mock container.
    pub fn put(&self, key: &str) {
        self.objects.lock().unwrap().insert(key.to_string());
    }

    pub fn has_object(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains(key)
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    pub fn sign_calls(&self) -> Vec<(String, Duration)> {
        self.sign_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn delete(&self, object_key: &str) -> StorageResult<()> {
        self.delete_calls
            .lock()
            .unwrap()
            .push(object_key.to_string());

        if self.fail_deletes {
            return Err(StorageError::BackendError("simulated outage".to_string()));
        }
        if self.objects.lock().unwrap().remove(object_key) {
            Ok(())
        } else {
            Err(StorageError::NotFound(object_key.to_string()))
        }
    }

    async fn signed_read_url(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> StorageResult<SignedAccessUrl> {
        self.sign_calls
            .lock()
            .unwrap()
            .push((object_key.to_string(), expires_in));

        Ok(SignedAccessUrl::new(format!(
            "{}?sv=2022-11-02&se={}&sp=r&sig=mock",
            canonical_url(object_key),
            expires_in.as_secs()
        )))
    }

    fn container(&self) -> &str {
        TEST_CONTAINER
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
