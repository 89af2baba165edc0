use std::sync::Arc;

use stockroom_core::DomainResult;
use stockroom_products::Category;

use super::communication_fault;
use crate::client::DataServiceClient;

#[derive(Clone)]
pub struct CategoryBusinessService {
    client: Arc<dyn DataServiceClient>,
}

impl CategoryBusinessService {
    pub fn new(client: Arc<dyn DataServiceClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> DomainResult<Vec<Category>> {
        self.client
            .list_categories()
            .await
            .map_err(|e| communication_fault("list_categories", e))
    }
}
