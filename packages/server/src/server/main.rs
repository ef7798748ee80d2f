// Main entry point for the dashboard API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::domains::pipeline::PostgresRecordStore;
use server_core::kernel::{BackendForwarder, ServerDeps};
use server_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sales Pipeline Dashboard API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let target = config.backend_target();
    tracing::info!(
        backend_api_url = %target.base_url,
        deployment_host = ?target.deployment_host,
        expose_proxy_errors = config.expose_proxy_errors,
        "Configuration loaded"
    );

    // Connect to database (schema is owned by the backend, no migrations here)
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let deps = ServerDeps::new(
        Arc::new(PostgresRecordStore::new(pool)),
        Arc::new(BackendForwarder::new(target, config.expose_proxy_errors)),
    );
    let app = build_app(deps, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Dashboard data: http://localhost:{}/api/dashboard", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
