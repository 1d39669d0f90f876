use anyhow::Context;
use tracing_subscriber::EnvFilter;

use joke_moderate_api::config::AppConfig;
use joke_moderate_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up the upstream URLs and operator credentials
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        environment = ?config.environment,
        delivery = %config.upstream.delivery_url,
        submit = %config.upstream.submit_url,
        "Starting joke moderation API"
    );

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::from_config(config).context("failed to build upstream clients")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
