use std::sync::Arc;

use chrono::Utc;

use stockroom_core::{DomainError, DomainResult, InventoryId, ProductId};
use stockroom_inventory::{Inventory, InventoryDraft};

use crate::store::EntityStore;

/// Inventory records. Every write stamps `updated_at`.
#[derive(Clone)]
pub struct InventoryDataService {
    store: Arc<dyn EntityStore>,
}

impl InventoryDataService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: InventoryDraft) -> DomainResult<Inventory> {
        self.ensure_product(&draft).await?;
        let record = self.store.insert_inventory(&draft, Utc::now()).await?;
        tracing::info!(
            inventory_id = %record.id,
            product_id = ?draft.product_id,
            quantity = ?draft.quantity,
            "inventory record created"
        );
        Ok(record)
    }

    pub async fn get(&self, id: InventoryId) -> DomainResult<Inventory> {
        self.store
            .find_inventory(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_by_product(&self, product_id: ProductId) -> DomainResult<Inventory> {
        self.store
            .find_inventory_by_product(product_id)
            .await?
            .ok_or_else(|| not_found_for_product(product_id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Inventory>> {
        Ok(self.store.list_inventory().await?)
    }

    /// Records at or below their stock minimum.
    pub async fn low_stock(&self) -> DomainResult<Vec<Inventory>> {
        Ok(self.store.low_stock_inventory().await?)
    }

    /// Records whose quantity is exactly zero.
    pub async fn out_of_stock(&self) -> DomainResult<Vec<Inventory>> {
        Ok(self.store.inventory_with_quantity(0).await?)
    }

    pub async fn list_with_product(&self) -> DomainResult<Vec<Inventory>> {
        Ok(self.store.inventory_with_product().await?)
    }

    pub async fn update(&self, id: InventoryId, draft: InventoryDraft) -> DomainResult<Inventory> {
        if !self.store.inventory_exists(id).await? {
            return Err(not_found(id));
        }
        self.ensure_product(&draft).await?;

        self.store
            .replace_inventory(id, &draft, Utc::now())
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: InventoryId) -> DomainResult<()> {
        if !self.store.inventory_exists(id).await? {
            return Err(not_found(id));
        }
        self.store.delete_inventory(id).await?;
        tracing::info!(inventory_id = %id, "inventory record deleted");
        Ok(())
    }

    /// Replace the on-hand quantity of the product's record.
    pub async fn set_quantity(&self, product_id: ProductId, quantity: i32) -> DomainResult<Inventory> {
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        let current = self.get_by_product(product_id).await?;

        let draft = InventoryDraft {
            product_id: current.product_id(),
            quantity: Some(quantity),
            min_stock: current.min_stock,
        };
        let updated = self
            .store
            .replace_inventory(current.id, &draft, Utc::now())
            .await?
            .ok_or_else(|| not_found(current.id))?;

        tracing::info!(
            inventory_id = %updated.id,
            product_id = %product_id,
            previous = ?current.quantity,
            quantity,
            "inventory quantity updated"
        );
        Ok(updated)
    }

    /// `false` when the product has no record or its quantity is unknown.
    pub async fn has_sufficient_stock(&self, product_id: ProductId, required: i32) -> DomainResult<bool> {
        Ok(self
            .store
            .find_inventory_by_product(product_id)
            .await?
            .is_some_and(|record| record.has_at_least(required)))
    }

    async fn ensure_product(&self, draft: &InventoryDraft) -> DomainResult<()> {
        match draft.product_id {
            Some(id) if !self.store.product_exists(id).await? => Err(DomainError::not_found(
                format!("product not found with id: {id}"),
            )),
            _ => Ok(()),
        }
    }
}

fn not_found(id: InventoryId) -> DomainError {
    DomainError::not_found(format!("inventory not found with id: {id}"))
}

fn not_found_for_product(product_id: ProductId) -> DomainError {
    DomainError::not_found(format!("inventory not found for product id: {product_id}"))
}
