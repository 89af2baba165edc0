//! Data-tier services.
//!
//! Thin orchestration over an [`EntityStore`](crate::store::EntityStore):
//! existence and uniqueness checks first, then the write. Checks and writes
//! are not atomic; two concurrent creates with the same name may both pass.
//!
//! Every failure is a [`DomainError`](stockroom_core::DomainError):
//! - `NotFound` for missing ids and for payload references to missing entities,
//! - `Duplicate` for case-insensitive name collisions on create,
//! - `Validation` for a negative quantity update,
//! - `Storage` for anything the store reports.

pub mod categories;
pub mod inventory;
pub mod products;

use std::sync::Arc;

use crate::store::EntityStore;

pub use categories::CategoryDataService;
pub use inventory::InventoryDataService;
pub use products::ProductDataService;

/// All data-tier services over one shared store.
#[derive(Clone)]
pub struct DataServices {
    pub categories: CategoryDataService,
    pub products: ProductDataService,
    pub inventory: InventoryDataService,
}

impl DataServices {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            categories: CategoryDataService::new(store.clone()),
            products: ProductDataService::new(store.clone()),
            inventory: InventoryDataService::new(store),
        }
    }
}
