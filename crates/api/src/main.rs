use std::sync::Arc;

use anyhow::Context;

use courier_api::app::services::{InMemoryMessageService, SharedMessageService};
use courier_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    courier_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let services: SharedMessageService = if config.seed {
        Arc::new(InMemoryMessageService::seeded())
    } else {
        Arc::new(InMemoryMessageService::new())
    };

    let app = courier_api::app::build_app(config.jwt_secret.clone(), services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
