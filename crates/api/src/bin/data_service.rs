use anyhow::Context;

use stockroom_infra::config::DataServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init("data-service");

    let config = DataServiceConfig::from_env()?;
    let services = stockroom_api::app::services::build_data_services(&config)
        .await
        .context("failed to initialize the entity store")?;
    let app = stockroom_api::app::build_data_app(services);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    tracing::info!("data service listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
