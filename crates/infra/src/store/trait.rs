use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use stockroom_core::{CategoryId, DomainError, InventoryId, ProductId};
use stockroom_inventory::{Inventory, InventoryDraft};
use stockroom_products::{Category, CategoryDraft, Product, ProductDraft};

/// Entity store failure.
///
/// Always surfaces to callers as an unclassified error; the detail is for logs.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("malformed row: {0}")]
    Decode(String),

    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::storage(err.to_string())
    }
}

/// Keyed storage of categories.
///
/// Name lookups are case-insensitive.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, StoreError>;

    /// Overwrite the record stored under `id`. `None` when no such record exists.
    async fn replace_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, StoreError>;

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, StoreError>;

    async fn category_exists(&self, id: CategoryId) -> Result<bool, StoreError>;

    async fn category_name_taken(&self, name: &str) -> Result<bool, StoreError>;

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Products referencing the category keep existing with no category.
    async fn delete_category(&self, id: CategoryId) -> Result<(), StoreError>;
}

/// Keyed storage of products (category resolved on read).
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(
        &self,
        draft: &ProductDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Product, StoreError>;

    /// Overwrite the record stored under `id`, keeping its creation time.
    async fn replace_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, StoreError>;

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    async fn product_exists(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Case-insensitive.
    async fn product_name_taken(&self, name: &str) -> Result<bool, StoreError>;

    /// Products whose category name matches exactly (case-sensitive).
    async fn products_in_category(&self, category_name: &str) -> Result<Vec<Product>, StoreError>;

    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Inventory records referencing the product keep existing with no product.
    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError>;
}

/// Keyed storage of inventory records (product resolved on read).
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn insert_inventory(
        &self,
        draft: &InventoryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Inventory, StoreError>;

    async fn replace_inventory(
        &self,
        id: InventoryId,
        draft: &InventoryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Inventory>, StoreError>;

    async fn find_inventory(&self, id: InventoryId) -> Result<Option<Inventory>, StoreError>;

    /// First record (lowest id) for the product.
    async fn find_inventory_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Inventory>, StoreError>;

    async fn inventory_exists(&self, id: InventoryId) -> Result<bool, StoreError>;

    async fn list_inventory(&self) -> Result<Vec<Inventory>, StoreError>;

    /// Records with `quantity <= min_stock` (both present).
    async fn low_stock_inventory(&self) -> Result<Vec<Inventory>, StoreError>;

    async fn inventory_with_quantity(&self, quantity: i32) -> Result<Vec<Inventory>, StoreError>;

    /// Records whose product reference is present.
    async fn inventory_with_product(&self) -> Result<Vec<Inventory>, StoreError>;

    async fn delete_inventory(&self, id: InventoryId) -> Result<(), StoreError>;
}

/// Everything the data tier needs from one backend.
pub trait EntityStore: CategoryStore + ProductStore + InventoryStore {}

impl<T> EntityStore for T where T: CategoryStore + ProductStore + InventoryStore {}
