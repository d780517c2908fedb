use anyhow::{Context, Result};
use clydeai::config::RelayConfig;
use clydeai::server::{build_router, RelayState};
use clydeai::util::init_tracing;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = RelayConfig::from_env()?;
    let client = config.build_client()?;
    tracing::info!(
        "Relaying chats to {} with model {}",
        client.base_url(),
        config.model
    );

    let app = build_router(RelayState {
        client,
        model: config.model.clone(),
    });

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("ClydeAI relay listening on http://{}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Relay server error")?;
    Ok(())
}
