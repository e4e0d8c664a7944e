//! fulfilment_server — standalone REST server.
//!
//! Configuration is read from the environment (and a `.env` file when
//! present); see `fulfilment_server::config` for the variables.

use anyhow::Context;
use fulfilment_server::bootstrap::build_services;
use fulfilment_server::config::ServerConfig;
use fulfilment_server::router::build_router;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fulfilment_server=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(limits = ?config.limits, "configuration loaded");

    let services = build_services(&config).await?;
    let app = build_router(services.fulfilment.clone(), services.warehouses.clone());

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("fulfilment_server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = services.database {
        database.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
