use anyhow::Context;

use stockroom_infra::config::BusinessServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init("business-service");

    let config = BusinessServiceConfig::from_env()?;
    let services = stockroom_api::app::services::build_business_services(&config);
    let app = stockroom_api::app::build_business_app(services);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    tracing::info!("business service listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
