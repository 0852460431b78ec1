use foodbook_core::AppConfig;
use foodbook_server::{AppState, router};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Interval at which expired rate-limit entries are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(config)?;
    state.limiter.spawn_sweeper(SWEEP_INTERVAL);

    let addr = state.config.server.bind.clone();
    let app = router(state);

    tracing::info!("foodbook-server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
