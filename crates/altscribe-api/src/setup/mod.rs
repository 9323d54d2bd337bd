//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;

use altscribe_core::Config;
use anyhow::{Context, Result};

/// Validate configuration, initialize tracing, build the backends and the router.
pub async fn initialize_app(config: &Config) -> Result<axum::Router> {
    // Fail fast on missing credentials before any client is built
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        function = %config.function_name(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(config).await?;

    Ok(routes::setup_routes(config.function_name(), state))
}
