//! Error types module
//!
//! All failures that can end an ingest invocation are unified under
//! [`AppError`]. Backend crates keep their own error enums and convert at the
//! handler boundary.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed trigger payloads
    Debug,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error is surfaced to the hosting platform.
pub trait ErrorMetadata {
    /// HTTP status code returned to the host
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "MODEL_SERVICE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the host's retry policy may succeed on a later attempt
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid trigger event: {0}")]
    InvalidEvent(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Document store error: {0}")]
    DocumentStore(String),

    #[error("Model service error: {message}")]
    ModelService {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata per variant: (http_status, error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Config(_) => (500, "CONFIG_ERROR", false, LogLevel::Error),
        AppError::InvalidEvent(_) => (400, "INVALID_EVENT", false, LogLevel::Debug),
        AppError::Storage(_) => (500, "STORAGE_ERROR", true, LogLevel::Error),
        AppError::DocumentStore(_) => (500, "DOCUMENT_STORE_ERROR", true, LogLevel::Error),
        AppError::ModelService { .. } => (502, "MODEL_SERVICE_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}
