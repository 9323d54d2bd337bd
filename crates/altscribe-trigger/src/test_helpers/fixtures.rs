use altscribe_core::{DescriptionRecord, IngestEvent};

pub const TEST_CONTAINER: &str = "images-description";
pub const TEST_ACCOUNT_URL: &str = "https://images06.blob.core.windows.net";

/// Upload notification for `key` inside the test container.
pub fn event_for(key: &str) -> IngestEvent {
    IngestEvent::new(format!("{}/{}", TEST_CONTAINER, key), 1024)
}

/// Canonical object address the mock storage signs for `key`.
pub fn canonical_url(key: &str) -> String {
    format!("{}/{}/{}", TEST_ACCOUNT_URL, TEST_CONTAINER, key)
}

pub fn existing_record(id: &str) -> DescriptionRecord {
    DescriptionRecord {
        id: id.to_string(),
        url: canonical_url(id),
        description: "Description existante".to_string(),
    }
}
