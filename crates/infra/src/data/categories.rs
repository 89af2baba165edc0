use std::sync::Arc;

use stockroom_core::{CategoryId, DomainError, DomainResult};
use stockroom_products::{Category, CategoryDraft};

use crate::store::EntityStore;

#[derive(Clone)]
pub struct CategoryDataService {
    store: Arc<dyn EntityStore>,
}

impl CategoryDataService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: CategoryDraft) -> DomainResult<Category> {
        if self.store.category_name_taken(&draft.name).await? {
            return Err(DomainError::duplicate(format!(
                "category already registered: {}",
                draft.name
            )));
        }
        let category = self.store.insert_category(&draft).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn get(&self, id: CategoryId) -> DomainResult<Category> {
        self.store
            .find_category(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Case-insensitive.
    pub async fn get_by_name(&self, name: &str) -> DomainResult<Category> {
        self.store
            .find_category_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("category not found with name: {name}")))
    }

    pub async fn list(&self) -> DomainResult<Vec<Category>> {
        Ok(self.store.list_categories().await?)
    }

    /// Overwrites the whole record. Names are not re-checked for uniqueness.
    pub async fn update(&self, id: CategoryId, draft: CategoryDraft) -> DomainResult<Category> {
        self.store
            .replace_category(id, &draft)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        if !self.store.category_exists(id).await? {
            return Err(not_found(id));
        }
        self.store.delete_category(id).await?;
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }
}

fn not_found(id: CategoryId) -> DomainError {
    DomainError::not_found(format!("category not found with id: {id}"))
}
