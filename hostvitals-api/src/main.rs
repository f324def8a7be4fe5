mod app;

use app::{app_router, AppState};
use dotenvy::dotenv;
use hostvitals_core::{default_registry, Aggregator, ServerConfig, SystemProbe};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenv();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let mut registry = default_registry(Arc::new(SystemProbe::new()))?;
    config.apply(&mut registry)?;
    info!(
        facets = registry.len(),
        default_timeout_ms = config.facet_timeout.as_millis() as u64,
        "facet registry ready"
    );

    let state = AppState::new(registry, Aggregator::new(config.facet_timeout));
    let app = app_router(state);

    let bind = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("starting API on {}", bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
