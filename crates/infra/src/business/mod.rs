//! Business-tier services.
//!
//! Everything goes through a [`DataServiceClient`]. Client failures never
//! leak: each one is logged with its detail and surfaced as
//! `DomainError::Communication`. The one exception is a 404 on a product
//! lookup, which stays a `NotFound`.

pub mod categories;
pub mod inventory;
pub mod products;

use std::sync::Arc;

use stockroom_core::DomainError;

use crate::client::{ClientError, DataServiceClient};

pub use categories::CategoryBusinessService;
pub use inventory::InventoryBusinessService;
pub use products::ProductBusinessService;

/// All business-tier services over one shared client.
#[derive(Clone)]
pub struct BusinessServices {
    pub products: ProductBusinessService,
    pub categories: CategoryBusinessService,
    pub inventory: InventoryBusinessService,
}

impl BusinessServices {
    pub fn new(client: Arc<dyn DataServiceClient>) -> Self {
        Self {
            products: ProductBusinessService::new(client.clone()),
            categories: CategoryBusinessService::new(client.clone()),
            inventory: InventoryBusinessService::new(client),
        }
    }
}

/// Log the client failure and collapse it into the communication fault.
pub(crate) fn communication_fault(operation: &'static str, err: ClientError) -> DomainError {
    tracing::error!(operation, error = %err, "data service call failed");
    DomainError::communication()
}
