use std::sync::Arc;

use chrono::Utc;

use stockroom_core::{DomainError, DomainResult, ProductId};
use stockroom_products::{Product, ProductDraft};

use crate::store::EntityStore;

#[derive(Clone)]
pub struct ProductDataService {
    store: Arc<dyn EntityStore>,
}

impl ProductDataService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Stamps the creation time.
    pub async fn create(&self, draft: ProductDraft) -> DomainResult<Product> {
        ensure_price(&draft)?;
        if self.store.product_name_taken(&draft.name).await? {
            return Err(DomainError::duplicate(format!(
                "product already registered: {}",
                draft.name
            )));
        }
        self.ensure_category(&draft).await?;

        let product = self.store.insert_product(&draft, Utc::now()).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub async fn get(&self, id: ProductId) -> DomainResult<Product> {
        self.store
            .find_product(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Products whose category name matches exactly.
    pub async fn by_category(&self, category_name: &str) -> DomainResult<Vec<Product>> {
        Ok(self.store.products_in_category(category_name).await?)
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }

    /// Overwrites the whole record except its creation time.
    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        if !self.store.product_exists(id).await? {
            return Err(not_found(id));
        }
        ensure_price(&draft)?;
        self.ensure_category(&draft).await?;

        self.store
            .replace_product(id, &draft)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: ProductId) -> DomainResult<()> {
        if !self.store.product_exists(id).await? {
            return Err(not_found(id));
        }
        self.store.delete_product(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn ensure_category(&self, draft: &ProductDraft) -> DomainResult<()> {
        match draft.category_id {
            Some(id) if !self.store.category_exists(id).await? => Err(DomainError::not_found(
                format!("category not found with id: {id}"),
            )),
            _ => Ok(()),
        }
    }
}

fn ensure_price(draft: &ProductDraft) -> DomainResult<()> {
    match draft.price {
        Some(price) if price.is_sign_negative() && !price.is_zero() => {
            Err(DomainError::validation("price cannot be negative"))
        }
        _ => Ok(()),
    }
}

fn not_found(id: ProductId) -> DomainError {
    DomainError::not_found(format!("product not found with id: {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stockroom_core::CategoryId;
    use stockroom_products::CategoryDraft;

    use crate::store::{CategoryStore, InMemoryEntityStore};

    fn setup() -> (Arc<InMemoryEntityStore>, ProductDataService) {
        let store = Arc::new(InMemoryEntityStore::new());
        let svc = ProductDataService::new(store.clone());
        (store, svc)
    }

    #[tokio::test]
    async fn create_resolves_the_category() {
        let (store, svc) = setup();
        let cat = store.insert_category(&CategoryDraft::new("Electronics")).await.unwrap();

        let product = svc
            .create(ProductDraft::new("Laptop", Decimal::new(129999, 2)).in_category(cat.id))
            .await
            .unwrap();

        assert_eq!(product.category, Some(cat));
        assert_eq!(svc.get(product.id).await.unwrap(), product);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_names_ignoring_case() {
        let (_, svc) = setup();
        svc.create(ProductDraft::new("Laptop", Decimal::ONE)).await.unwrap();

        let err = svc.create(ProductDraft::new("laptop", Decimal::TEN)).await.unwrap_err();
        assert_eq!(err, DomainError::duplicate("product already registered: laptop"));
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let (_, svc) = setup();
        let err = svc
            .create(ProductDraft::new("Chair", Decimal::ONE).in_category(CategoryId::new(42)))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::not_found("category not found with id: 42"));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_prices_are_rejected_before_any_write() {
        let (_, svc) = setup();
        let err = svc
            .create(ProductDraft::new("Refund", Decimal::new(-1, 2)))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation("price cannot be negative"));
        assert!(svc.list().await.unwrap().is_empty());

        let free = svc.create(ProductDraft::new("Sticker", Decimal::ZERO)).await.unwrap();
        let err = svc
            .update(free.id, ProductDraft::new("Sticker", Decimal::NEGATIVE_ONE))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation("price cannot be negative"));
        assert_eq!(svc.get(free.id).await.unwrap().price, Some(Decimal::ZERO));
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let (_, svc) = setup();
        let created = svc.create(ProductDraft::new("Lamp", Decimal::ONE)).await.unwrap();

        let updated = svc
            .update(created.id, ProductDraft::new("Desk lamp", Decimal::TWO).with_description("LED"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.description.as_deref(), Some("LED"));
    }

    #[tokio::test]
    async fn by_category_matches_the_exact_name() {
        let (store, svc) = setup();
        let cat = store.insert_category(&CategoryDraft::new("Books")).await.unwrap();
        svc.create(ProductDraft::new("Novel", Decimal::ONE).in_category(cat.id))
            .await
            .unwrap();
        svc.create(ProductDraft::new("Pen", Decimal::ONE)).await.unwrap();

        let found = svc.by_category("Books").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Novel");
        assert!(svc.by_category("Unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_requires_an_existing_product() {
        let (_, svc) = setup();
        let created = svc.create(ProductDraft::new("Cup", Decimal::ONE)).await.unwrap();

        svc.delete(created.id).await.unwrap();
        assert_eq!(
            svc.delete(created.id).await.unwrap_err(),
            DomainError::not_found(format!("product not found with id: {}", created.id))
        );
    }
}
