//! Custom handler payloads
//!
//! Request body of a blob-trigger invocation:
//!
//! ```json
//! {
//!   "Data": { "blob": "..." },
//!   "Metadata": {
//!     "BlobTrigger": "images-description/shoes/red.png",
//!     "Properties": { "Length": 48213 }
//!   }
//! }
//! ```

use altscribe_core::{AppError, IngestEvent, IngestOutcome};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvokeRequest {
    /// Input bindings. The blob content is not needed and left untouched.
    #[serde(default)]
    pub data: Value,
    pub metadata: TriggerMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TriggerMetadata {
    /// Full blob path, container segment included
    #[serde(default)]
    pub blob_trigger: String,
    #[serde(default)]
    pub properties: BlobProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlobProperties {
    #[serde(rename = "Length", alias = "ContentLength", default)]
    pub length: u64,
}

impl InvokeRequest {
    pub fn into_event(self) -> Result<IngestEvent, AppError> {
        let path = self.metadata.blob_trigger.trim().to_string();
        if path.is_empty() {
            return Err(AppError::InvalidEvent(
                "Metadata.BlobTrigger is missing or empty".to_string(),
            ));
        }
        Ok(IngestEvent::new(path, self.metadata.properties.length))
    }
}

/// Invocation result read by the Functions host
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvokeResponse {
    pub outputs: Map<String, Value>,
    pub logs: Vec<String>,
    pub return_value: Option<Value>,
}

impl InvokeResponse {
    pub fn completed(event: &IngestEvent, outcome: IngestOutcome) -> Self {
        Self {
            outputs: Map::new(),
            logs: vec![format!("{}: {}", event.path, outcome)],
            return_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_length_and_content_length() {
        let with_length: InvokeRequest = serde_json::from_value(json!({
            "Data": {},
            "Metadata": { "BlobTrigger": "images-description/a.png", "Properties": { "Length": 42 } }
        }))
        .unwrap();
        let event = with_length.into_event().unwrap();
        assert_eq!(event.path, "images-description/a.png");
        assert_eq!(event.length, 42);

        let with_content_length: InvokeRequest = serde_json::from_value(json!({
            "Metadata": { "BlobTrigger": "images-description/b.png", "Properties": { "ContentLength": 7 } }
        }))
        .unwrap();
        assert_eq!(with_content_length.into_event().unwrap().length, 7);
    }

    #[test]
    fn test_missing_length_defaults_to_zero() {
        let request: InvokeRequest = serde_json::from_value(json!({
            "Metadata": { "BlobTrigger": "images-description/a.png" }
        }))
        .unwrap();
        assert_eq!(request.into_event().unwrap().length, 0);
    }

    #[test]
    fn test_empty_blob_path_rejected() {
        let request: InvokeRequest = serde_json::from_value(json!({ "Metadata": {} })).unwrap();
        assert!(matches!(
            request.into_event(),
            Err(AppError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_response_shape() {
        let event = IngestEvent::new("images-description/a.png", 1);
        let body = serde_json::to_value(InvokeResponse::completed(&event, IngestOutcome::Stored))
            .unwrap();
        assert_eq!(body["Outputs"], json!({}));
        assert_eq!(body["Logs"], json!(["images-description/a.png: stored"]));
        assert_eq!(body["ReturnValue"], Value::Null);
    }
}
