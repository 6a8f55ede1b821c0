use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;

use supablog::telemetry::{TelemetryConfig, init_telemetry};
use supablog::{AppState, Config, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be populated.
    dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = Config::from_env().context("invalid configuration")?;
    let app_state = AppState::new(&config).context("failed to initialize application state")?;

    let listener = tokio::net::TcpListener::bind(&config.host)
        .await
        .with_context(|| format!("failed to bind {}", config.host))?;

    tracing::info!(host = %config.host, "listening");

    let app = routes::build_app(Arc::new(app_state));

    axum::serve(listener, app).await.context("server error")
}
