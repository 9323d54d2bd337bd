//! Mock description store over the in-memory backend, counting reads and writes

use altscribe_core::DescriptionRecord;
use altscribe_db::{
    CreateOutcome, DescriptionStore, InMemoryDescriptionStore, Lookup, StoreError, StoreResult,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MockDescriptionStore {
    inner: InMemoryDescriptionStore,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MockDescriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point reads fail with a 503.
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Creates fail with a 503.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, record: DescriptionRecord) {
        self.inner.insert(record);
    }

    pub fn get(&self, id: &str) -> Option<DescriptionRecord> {
        self.inner.get(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Create attempts, including conflicts and failures.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

fn unavailable() -> StoreError {
    StoreError::Http {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

#[async_trait]
impl DescriptionStore for MockDescriptionStore {
    async fn point_read(&self, id: &str) -> StoreResult<Lookup> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(unavailable());
        }
        self.inner.point_read(id).await
    }

    async fn create_item(&self, record: &DescriptionRecord) -> StoreResult<CreateOutcome> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(unavailable());
        }
        self.inner.create_item(record).await
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
