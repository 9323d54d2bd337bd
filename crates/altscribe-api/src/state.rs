use altscribe_trigger::BlobIngestHandler;

/// Shared state of the HTTP host. Cloned per request; the handler only holds
/// `Arc`s of the backend clients.
#[derive(Clone)]
pub struct AppState {
    pub handler: BlobIngestHandler,
}

impl AppState {
    pub fn new(handler: BlobIngestHandler) -> Self {
        Self { handler }
    }
}
