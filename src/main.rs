use tracing_subscriber::EnvFilter;

use copycraft_checkout::adapters::http::app_router;
use copycraft_checkout::bootstrap::{build_state, StartupError};
use copycraft_checkout::config::{AppConfig, LogFormat, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config
        .validate()
        .map_err(|e| StartupError::Config(e.into()))?;

    let state = build_state(&config).await?;
    let app = app_router(
        state,
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr = config
        .server
        .socket_addr()
        .map_err(|e| StartupError::Invalid(e.to_string()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "checkout service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
