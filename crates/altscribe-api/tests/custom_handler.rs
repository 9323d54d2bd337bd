//! Custom handler protocol over mock backends.

use altscribe_api::error::ErrorResponse;
use altscribe_api::invocation::InvokeResponse;
use altscribe_api::setup::routes::setup_routes;
use altscribe_api::state::AppState;
use altscribe_trigger::test_helpers::*;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

const FUNCTION: &str = "descriptions_trigger";

struct TestApp {
    server: TestServer,
    storage: MockStorage,
    store: MockDescriptionStore,
    generator: MockGenerator,
}

fn app_with(storage: MockStorage, store: MockDescriptionStore, generator: MockGenerator) -> TestApp {
    let handler = handler_with(&storage, &store, &generator);
    let router = setup_routes(FUNCTION, AppState::new(handler));
    TestApp {
        server: TestServer::new(router).unwrap(),
        storage,
        store,
        generator,
    }
}

fn app() -> TestApp {
    app_with(
        MockStorage::new(),
        MockDescriptionStore::new(),
        MockGenerator::new(),
    )
}

fn invocation(blob_path: &str) -> Value {
    json!({
        "Data": { "blob": "" },
        "Metadata": {
            "BlobTrigger": blob_path,
            "Properties": { "Length": 2048 },
            "sys": { "MethodName": FUNCTION }
        }
    })
}

#[tokio::test]
async fn liveness_reports_alive() {
    let app = app();

    let response = app.server.get("/health/live").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "alive" }));
}

#[tokio::test]
async fn image_invocation_stores_description() {
    let app = app();

    let response = app
        .server
        .post(&format!("/{}", FUNCTION))
        .json(&invocation("images-description/shoes/red.png"))
        .await;

    response.assert_status_ok();
    let body: InvokeResponse = response.json();
    assert!(body.outputs.is_empty());
    assert!(body.return_value.is_none());
    assert_eq!(body.logs, vec!["images-description/shoes/red.png: stored"]);

    let record = app.store.get("red.png").unwrap();
    assert_eq!(record.url, canonical_url("shoes/red.png"));
    assert_eq!(app.generator.call_count(), 1);
}

#[tokio::test]
async fn disallowed_invocation_deletes_blob() {
    let app = app();
    app.storage.put("report.pdf");

    let response = app
        .server
        .post(&format!("/{}", FUNCTION))
        .json(&invocation("images-description/report.pdf"))
        .await;

    response.assert_status_ok();
    let body: InvokeResponse = response.json();
    assert_eq!(body.logs, vec!["images-description/report.pdf: deleted"]);
    assert!(!app.storage.has_object("report.pdf"));
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn model_failure_fails_invocation() {
    let app = app_with(
        MockStorage::new(),
        MockDescriptionStore::new(),
        MockGenerator::failing(),
    );

    let response = app
        .server
        .post(&format!("/{}", FUNCTION))
        .json(&invocation("images-description/red.png"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "MODEL_SERVICE_ERROR");
    assert!(body.recoverable);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn lookup_failure_fails_invocation() {
    let app = app_with(
        MockStorage::new(),
        MockDescriptionStore::failing_reads(),
        MockGenerator::new(),
    );

    let response = app
        .server
        .post(&format!("/{}", FUNCTION))
        .json(&invocation("images-description/red.png"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "DOCUMENT_STORE_ERROR");
}

#[tokio::test]
async fn malformed_payload_is_rejected() {
    let app = app();

    let response = app
        .server
        .post(&format!("/{}", FUNCTION))
        .json(&json!({ "Metadata": "not an object" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "INVALID_EVENT");
    assert_eq!(app.storage.delete_calls().len(), 0);
}

#[tokio::test]
async fn missing_blob_path_is_rejected() {
    let app = app();

    let response = app
        .server
        .post(&format!("/{}", FUNCTION))
        .json(&json!({ "Data": {}, "Metadata": { "Properties": { "Length": 1 } } }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
