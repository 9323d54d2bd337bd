use crate::error::{HttpAppError, ValidatedJson};
use crate::invocation::{InvokeRequest, InvokeResponse};
use crate::state::AppState;
use axum::{extract::State, Json};

/// Blob-trigger invocation forwarded by the Functions host.
///
/// Returns 200 once the handler reaches a terminal outcome. Lookup, signing
/// and model failures become error statuses so the host records the
/// invocation as failed.
pub async fn invoke_blob_trigger(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<InvokeRequest>,
) -> Result<Json<InvokeResponse>, HttpAppError> {
    let event = request.into_event()?;
    let start = std::time::Instant::now();

    let outcome = state.handler.handle(&event).await?;

    tracing::info!(
        blob = %event.path,
        outcome = %outcome,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Invocation completed"
    );

    Ok(Json(InvokeResponse::completed(&event, outcome)))
}
