//! In-process document store
//!
//! Used for local runs (`DESCRIPTION_STORE=memory`) and as the store in tests.
//! Contents are lost when the process exits.

use crate::traits::{CreateOutcome, DescriptionStore, Lookup, StoreResult};
use altscribe_core::DescriptionRecord;
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Default)]
pub struct InMemoryDescriptionStore {
    documents: Arc<Mutex<HashMap<String, DescriptionRecord>>>,
}

impl InMemoryDescriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document (test setup).
    pub fn insert(&self, record: DescriptionRecord) {
        self.lock().insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<DescriptionRecord> {
        self.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DescriptionRecord>> {
        // A poisoned map is still consistent: every mutation is a single insert.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DescriptionStore for InMemoryDescriptionStore {
    async fn point_read(&self, id: &str) -> StoreResult<Lookup> {
        Ok(match self.lock().get(id) {
            Some(record) => Lookup::Found(record.clone()),
            None => Lookup::NotFound,
        })
    }

    async fn create_item(&self, record: &DescriptionRecord) -> StoreResult<CreateOutcome> {
        match self.lock().entry(record.id.clone()) {
            Entry::Occupied(_) => Ok(CreateOutcome::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(CreateOutcome::Created)
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
