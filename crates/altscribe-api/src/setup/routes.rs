use crate::handlers::{health, trigger};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Invocation payloads carry blob metadata and, depending on the binding,
/// the blob content itself.
const MAX_INVOCATION_BYTES: usize = 64 * 1024 * 1024;

const MAX_CONCURRENT_INVOCATIONS: usize = 256;

pub fn setup_routes(function_name: &str, state: AppState) -> Router {
    let function_path = format!("/{}", function_name.trim_matches('/'));
    tracing::info!(path = %function_path, "Registering blob trigger route");

    Router::new()
        .route(&function_path, post(trigger::invoke_blob_trigger))
        .route("/health/live", get(health::liveness_check))
        .with_state(state)
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_INVOCATIONS))
        .layer(RequestBodyLimitLayer::new(MAX_INVOCATION_BYTES))
        .layer(TraceLayer::new_for_http())
}
