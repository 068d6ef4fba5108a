use anyhow::Context;

use signet_auth::AuthConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    signet_observability::init();

    let config = AuthConfig::from_env().context("invalid session configuration")?;
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = signet_api::app::build_app(&config).context("invalid session configuration")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
