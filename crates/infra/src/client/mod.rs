//! Client side of the business → data tier boundary.
//!
//! The business services only see [`DataServiceClient`]; the HTTP
//! implementation lives in [`http`]. Errors keep the transport detail so it can
//! be logged, but callers translate every one of them into a single
//! communication fault.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::ProductId;
use stockroom_inventory::{Inventory, InventoryDraft};
use stockroom_products::{Category, Product, ProductDraft};

pub use http::HttpDataServiceClient;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("data service error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Operations the business tier needs from the data tier.
#[async_trait]
pub trait DataServiceClient: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;

    async fn get_product(&self, id: ProductId) -> Result<Product, ClientError>;

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError>;

    async fn products_by_category(&self, category_name: &str) -> Result<Vec<Product>, ClientError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;

    async fn create_inventory(&self, draft: &InventoryDraft) -> Result<Inventory, ClientError>;

    async fn low_stock(&self) -> Result<Vec<Inventory>, ClientError>;

    async fn list_inventory(&self) -> Result<Vec<Inventory>, ClientError>;
}
