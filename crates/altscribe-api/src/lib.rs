//! HTTP host for the blob ingest trigger
//!
//! Implements the Azure Functions custom handler protocol: the Functions host
//! forwards each blob-trigger invocation as a POST to `/{function_name}` and
//! reads the invocation result from the JSON response.

pub mod error;
pub mod handlers;
pub mod invocation;
pub mod setup;
pub mod state;
pub mod telemetry;
