use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use stockroom_core::{CategoryId, InventoryId, ProductId};
use stockroom_inventory::{Inventory, InventoryDraft};
use stockroom_products::{Category, CategoryDraft, Product, ProductDraft, same_name};

use super::r#trait::{CategoryStore, InventoryStore, ProductStore, StoreError};

#[derive(Debug, Clone)]
struct ProductRow {
    name: String,
    description: Option<String>,
    price: Option<Decimal>,
    category_id: Option<CategoryId>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct InventoryRow {
    product_id: Option<ProductId>,
    quantity: Option<i32>,
    min_stock: Option<i32>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, ProductRow>,
    inventory: BTreeMap<InventoryId, InventoryRow>,
    last_category_id: i64,
    last_product_id: i64,
    last_inventory_id: i64,
}

impl Tables {
    fn product(&self, id: ProductId) -> Option<Product> {
        let row = self.products.get(&id)?;
        Some(Product {
            id,
            name: row.name.clone(),
            description: row.description.clone(),
            price: row.price,
            category: row
                .category_id
                .and_then(|cid| self.categories.get(&cid).cloned()),
            created_at: row.created_at,
        })
    }

    fn inventory(&self, id: InventoryId, row: &InventoryRow) -> Inventory {
        Inventory {
            id,
            product: row.product_id.and_then(|pid| self.product(pid)),
            quantity: row.quantity,
            min_stock: row.min_stock,
            updated_at: row.updated_at,
        }
    }

    fn inventory_where(&self, pred: impl Fn(&InventoryRow) -> bool) -> Vec<Inventory> {
        self.inventory
            .iter()
            .filter(|(_, row)| pred(row))
            .map(|(id, row)| self.inventory(*id, row))
            .collect()
    }

    fn inventory_row(draft: &InventoryDraft, updated_at: DateTime<Utc>) -> InventoryRow {
        InventoryRow {
            product_id: draft.product_id,
            quantity: draft.quantity,
            min_stock: draft.min_stock,
            updated_at,
        }
    }
}

/// In-memory entity store for tests/dev.
///
/// Identifiers start at 1 and are never reused. Joins are resolved on read,
/// so a dangling reference reads back as an absent one.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    inner: RwLock<Tables>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl CategoryStore for InMemoryEntityStore {
    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, StoreError> {
        let mut t = self.write()?;
        t.last_category_id += 1;
        let category = draft.clone().into_category(CategoryId::new(t.last_category_id));
        t.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn replace_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, StoreError> {
        let mut t = self.write()?;
        let Some(slot) = t.categories.get_mut(&id) else {
            return Ok(None);
        };
        *slot = draft.clone().into_category(id);
        Ok(Some(slot.clone()))
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        Ok(self
            .read()?
            .categories
            .values()
            .find(|c| same_name(&c.name, name))
            .cloned())
    }

    async fn category_exists(&self, id: CategoryId) -> Result<bool, StoreError> {
        Ok(self.read()?.categories.contains_key(&id))
    }

    async fn category_name_taken(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .read()?
            .categories
            .values()
            .any(|c| same_name(&c.name, name)))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), StoreError> {
        let mut t = self.write()?;
        t.categories.remove(&id);
        for row in t.products.values_mut() {
            if row.category_id == Some(id) {
                row.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryEntityStore {
    async fn insert_product(
        &self,
        draft: &ProductDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Product, StoreError> {
        let mut t = self.write()?;
        t.last_product_id += 1;
        let id = ProductId::new(t.last_product_id);
        t.products.insert(
            id,
            ProductRow {
                name: draft.name.clone(),
                description: draft.description.clone(),
                price: draft.price,
                category_id: draft.category_id,
                created_at,
            },
        );
        t.product(id)
            .ok_or_else(|| StoreError::Decode(format!("product {id} vanished after insert")))
    }

    async fn replace_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, StoreError> {
        let mut t = self.write()?;
        let Some(row) = t.products.get_mut(&id) else {
            return Ok(None);
        };
        row.name = draft.name.clone();
        row.description = draft.description.clone();
        row.price = draft.price;
        row.category_id = draft.category_id;
        Ok(t.product(id))
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.product(id))
    }

    async fn product_exists(&self, id: ProductId) -> Result<bool, StoreError> {
        Ok(self.read()?.products.contains_key(&id))
    }

    async fn product_name_taken(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .read()?
            .products
            .values()
            .any(|p| same_name(&p.name, name)))
    }

    async fn products_in_category(&self, category_name: &str) -> Result<Vec<Product>, StoreError> {
        let t = self.read()?;
        Ok(t.products
            .keys()
            .filter_map(|id| t.product(*id))
            .filter(|p| p.category.as_ref().is_some_and(|c| c.name == category_name))
            .collect())
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let t = self.read()?;
        Ok(t.products.keys().filter_map(|id| t.product(*id)).collect())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let mut t = self.write()?;
        t.products.remove(&id);
        for row in t.inventory.values_mut() {
            if row.product_id == Some(id) {
                row.product_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for InMemoryEntityStore {
    async fn insert_inventory(
        &self,
        draft: &InventoryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Inventory, StoreError> {
        let mut t = self.write()?;
        t.last_inventory_id += 1;
        let id = InventoryId::new(t.last_inventory_id);
        let row = Tables::inventory_row(draft, updated_at);
        let record = t.inventory(id, &row);
        t.inventory.insert(id, row);
        Ok(record)
    }

    async fn replace_inventory(
        &self,
        id: InventoryId,
        draft: &InventoryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Inventory>, StoreError> {
        let mut t = self.write()?;
        if !t.inventory.contains_key(&id) {
            return Ok(None);
        }
        let row = Tables::inventory_row(draft, updated_at);
        let record = t.inventory(id, &row);
        t.inventory.insert(id, row);
        Ok(Some(record))
    }

    async fn find_inventory(&self, id: InventoryId) -> Result<Option<Inventory>, StoreError> {
        let t = self.read()?;
        Ok(t.inventory.get(&id).map(|row| t.inventory(id, row)))
    }

    async fn find_inventory_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Inventory>, StoreError> {
        let t = self.read()?;
        Ok(t.inventory_where(|row| row.product_id == Some(product_id))
            .into_iter()
            .next())
    }

    async fn inventory_exists(&self, id: InventoryId) -> Result<bool, StoreError> {
        Ok(self.read()?.inventory.contains_key(&id))
    }

    async fn list_inventory(&self) -> Result<Vec<Inventory>, StoreError> {
        Ok(self.read()?.inventory_where(|_| true))
    }

    async fn low_stock_inventory(&self) -> Result<Vec<Inventory>, StoreError> {
        Ok(self
            .read()?
            .inventory_where(|row| matches!((row.quantity, row.min_stock), (Some(q), Some(m)) if q <= m)))
    }

    async fn inventory_with_quantity(&self, quantity: i32) -> Result<Vec<Inventory>, StoreError> {
        Ok(self
            .read()?
            .inventory_where(|row| row.quantity == Some(quantity)))
    }

    async fn inventory_with_product(&self) -> Result<Vec<Inventory>, StoreError> {
        let t = self.read()?;
        Ok(t.inventory_where(|_| true)
            .into_iter()
            .filter(|inv| inv.product.is_some())
            .collect())
    }

    async fn delete_inventory(&self, id: InventoryId) -> Result<(), StoreError> {
        self.write()?.inventory.remove(&id);
        Ok(())
    }
}
