use std::sync::Arc;

use stockroom_infra::business::BusinessServices;
use stockroom_infra::client::HttpDataServiceClient;
use stockroom_infra::config::{BusinessServiceConfig, DataServiceConfig, StoreBackend};
use stockroom_infra::data::DataServices;
use stockroom_infra::store::{EntityStore, InMemoryEntityStore, PostgresEntityStore, StoreError};

/// Data-tier services over the configured store.
pub async fn build_data_services(config: &DataServiceConfig) -> Result<DataServices, StoreError> {
    let store: Arc<dyn EntityStore> = match &config.store {
        StoreBackend::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES not enabled; data is kept in memory only");
            Arc::new(InMemoryEntityStore::new())
        }
        StoreBackend::Postgres { database_url } => {
            let store = PostgresEntityStore::connect(database_url).await?;
            store.ensure_schema().await?;
            tracing::info!("using postgres entity store");
            Arc::new(store)
        }
    };

    Ok(DataServices::new(store))
}

/// Business-tier services talking to the configured data tier.
pub fn build_business_services(config: &BusinessServiceConfig) -> BusinessServices {
    tracing::info!(data_service_url = %config.data_service_url, "using data service");
    let client = HttpDataServiceClient::new(config.data_service_url.clone());
    BusinessServices::new(Arc::new(client))
}
