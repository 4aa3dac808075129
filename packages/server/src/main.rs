use anyhow::Context;
use tracing::info;

use mergington_server::config::AppConfig;
use mergington_server::state::AppState;
use mergington_server::{build_router, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = database::prepare(&config)
        .await
        .context("Failed to prepare database")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
