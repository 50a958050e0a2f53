use anyhow::Context;

use taproom_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    taproom_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let app = taproom_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(store = config.store.label(), "listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
