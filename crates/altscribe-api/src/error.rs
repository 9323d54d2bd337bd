//! HTTP error rendering
//!
//! Handlers return `Result<_, HttpAppError>`. The Functions host treats any
//! non-2xx status as a failed invocation and applies its retry policy.

use altscribe_core::{AppError, ErrorMetadata, LogLevel};
use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code
    pub code: String,
    /// Whether retrying the invocation may succeed
    pub recoverable: bool,
}

/// Wrapper so `IntoResponse` can be implemented for the core error type.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidEvent(format!(
            "Invalid invocation payload: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that rejects with [`ErrorResponse`] instead of axum's
/// plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let details = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %details, code = error.error_code(), "Invocation failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %details, code = error.error_code(), "Invocation failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.to_string(),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_metadata() {
        let response = HttpAppError(AppError::DocumentStore("503".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = HttpAppError(AppError::InvalidEvent("bad".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = HttpAppError(AppError::ModelService {
            message: "timeout".to_string(),
            source: anyhow::anyhow!("deadline exceeded"),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
