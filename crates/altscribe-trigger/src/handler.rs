use altscribe_core::constants::SIGNED_URL_TTL;
use altscribe_core::{
    is_allowed_extension, AppError, GeneratedDescription, IngestEvent, IngestOutcome,
    SignedAccessUrl,
};
use altscribe_db::{CreateOutcome, DescriptionStore, Lookup};
use altscribe_storage::{ObjectStorage, StorageError};
use altscribe_vision::DescriptionGenerator;
use std::sync::Arc;

/// Processes one upload notification.
///
/// Disallowed file types are removed from the container. Allowed images are
/// described once: the handler skips any file name that already has a record,
/// and otherwise signs a read URL, asks the generator for alt-text and stores
/// it.
///
/// Failures of the existence check, URL signing and the model call abort the
/// invocation. Delete and store failures are logged and reported through
/// [`IngestOutcome`] instead.
#[derive(Clone)]
pub struct BlobIngestHandler {
    storage: Arc<dyn ObjectStorage>,
    store: Arc<dyn DescriptionStore>,
    generator: Arc<dyn DescriptionGenerator>,
}

impl BlobIngestHandler {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        store: Arc<dyn DescriptionStore>,
        generator: Arc<dyn DescriptionGenerator>,
    ) -> Self {
        Self {
            storage,
            store,
            generator,
        }
    }

    #[tracing::instrument(skip(self, event), fields(blob = %event.path))]
    pub async fn handle(&self, event: &IngestEvent) -> Result<IngestOutcome, AppError> {
        tracing::info!(
            name = %event.path,
            size = event.length,
            "Processed blob"
        );

        if event.container() != self.storage.container() {
            tracing::warn!(
                event_container = %event.container(),
                storage_container = %self.storage.container(),
                "Event container differs from the configured container"
            );
        }

        let file_name = event.file_name();
        if !is_allowed_extension(file_name) {
            return Ok(self.remove_disallowed(event).await);
        }

        if self.description_exists(file_name).await? {
            tracing::info!(
                blob = %file_name,
                "Description already exists for blob. No action taken."
            );
            return Ok(IngestOutcome::Skipped);
        }

        let signed = self.sign(event).await?;
        let generated =
            self.generator
                .describe(&signed)
                .await
                .map_err(|e| AppError::ModelService {
                    message: format!("Description generation failed for {}", file_name),
                    source: e,
                })?;

        let outcome = self
            .insert_descriptions(vec![generated])
            .await
            .into_iter()
            .next()
            .unwrap_or(IngestOutcome::StoreFailed);
        Ok(outcome)
    }

    /// Delete a disallowed object. Never fails the invocation.
    async fn remove_disallowed(&self, event: &IngestEvent) -> IngestOutcome {
        let object_key = event.object_key();

        match self.storage.delete(&object_key).await {
            Ok(()) => {
                tracing::info!(
                    blob = %object_key,
                    "Blob deleted successfully as it is not an allowed file type"
                );
                IngestOutcome::Deleted
            }
            Err(StorageError::NotFound(_)) => {
                tracing::info!(
                    blob = %object_key,
                    "Blob does not exist. No deletion needed."
                );
                IngestOutcome::AlreadyAbsent
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    blob = %object_key,
                    "Could not delete blob"
                );
                IngestOutcome::DeleteFailed
            }
        }
    }

    /// Point lookup by file name. Store errors other than "not found" abort.
    async fn description_exists(&self, id: &str) -> Result<bool, AppError> {
        let lookup = self.store.point_read(id).await.map_err(|e| {
            AppError::DocumentStore(format!("Existence check failed for {}: {}", id, e))
        })?;

        if let Lookup::Found(record) = &lookup {
            tracing::debug!(id = %record.id, url = %record.url, "Existing description found");
        }
        Ok(lookup.is_found())
    }

    async fn sign(&self, event: &IngestEvent) -> Result<SignedAccessUrl, AppError> {
        let object_key = event.object_key();
        let signed = self
            .storage
            .signed_read_url(&object_key, SIGNED_URL_TTL)
            .await
            .map_err(|e| {
                AppError::Storage(format!("Could not sign read URL for {}: {}", object_key, e))
            })?;

        tracing::debug!(
            blob = %object_key,
            url = %signed.canonical(),
            ttl_secs = SIGNED_URL_TTL.as_secs(),
            "Signed read URL issued"
        );
        Ok(signed)
    }

    /// Create one record per description, keyed by the last segment of its URL.
    ///
    /// Existing records are never overwritten. A conflict is logged as a
    /// warning, any other failure as an error, and the remaining items are
    /// still attempted.
    pub async fn insert_descriptions(
        &self,
        descriptions: Vec<GeneratedDescription>,
    ) -> Vec<IngestOutcome> {
        let mut outcomes = Vec::with_capacity(descriptions.len());

        for generated in descriptions {
            let record = generated.into_record();
            let outcome = match self.store.create_item(&record).await {
                Ok(CreateOutcome::Created) => {
                    tracing::info!(
                        id = %record.id,
                        url = %record.url,
                        backend = self.store.backend_name(),
                        "Description stored"
                    );
                    IngestOutcome::Stored
                }
                Ok(CreateOutcome::Conflict) => {
                    tracing::warn!(id = %record.id, "Item already exists");
                    IngestOutcome::Conflict
                }
                Err(e) => {
                    tracing::error!(error = %e, id = %record.id, "Could not insert item");
                    IngestOutcome::StoreFailed
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}
