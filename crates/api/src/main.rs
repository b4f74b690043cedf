use std::sync::Arc;

use anyhow::Context;

use tablegate_api::app::{self, handlers, AppServices};
use tablegate_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    tablegate_observability::init(config.log_format);

    let registry = config
        .load_registry()?
        .into_registry()
        .context("invalid resource registry")?;
    let registry = Arc::new(registry);
    tracing::info!(resources = registry.entries().len(), "resource registry loaded");

    let handlers = handlers::reference_handlers(&registry);
    let app = app::build_app(AppServices::new(registry, handlers));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
