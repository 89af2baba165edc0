use std::sync::Arc;

use stockroom_core::{DomainError, DomainResult, ProductId};
use stockroom_inventory::InventoryDraft;
use stockroom_products::{ProductRequest, ProductView};

use super::communication_fault;
use crate::client::DataServiceClient;

#[derive(Clone)]
pub struct ProductBusinessService {
    client: Arc<dyn DataServiceClient>,
}

impl ProductBusinessService {
    pub fn new(client: Arc<dyn DataServiceClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> DomainResult<Vec<ProductView>> {
        let products = self
            .client
            .list_products()
            .await
            .map_err(|e| communication_fault("list_products", e))?;
        Ok(products.into_iter().map(ProductView::from).collect())
    }

    pub async fn get(&self, id: ProductId) -> DomainResult<ProductView> {
        match self.client.get_product(id).await {
            Ok(product) => Ok(product.into()),
            Err(e) if e.is_not_found() => Err(DomainError::not_found(format!(
                "product not found with id: {id}"
            ))),
            Err(e) => Err(communication_fault("get_product", e)),
        }
    }

    /// Validate, create the product, then open its inventory record when an
    /// initial stock is given (minimum 0).
    ///
    /// The two writes are independent: if the second fails the product stays.
    pub async fn create(&self, request: ProductRequest) -> DomainResult<ProductView> {
        request.validate()?;

        let product = self
            .client
            .create_product(&request.to_draft())
            .await
            .map_err(|e| communication_fault("create_product", e))?;

        if let Some(stock) = request.stock {
            self.client
                .create_inventory(&InventoryDraft::for_product(product.id, stock, 0))
                .await
                .map_err(|e| communication_fault("create_inventory", e))?;
        }

        tracing::info!(product_id = %product.id, stock = ?request.stock, "product registered");
        Ok(product.into())
    }

    pub async fn by_category(&self, category_name: &str) -> DomainResult<Vec<ProductView>> {
        let products = self
            .client
            .products_by_category(category_name)
            .await
            .map_err(|e| communication_fault("products_by_category", e))?;
        Ok(products.into_iter().map(ProductView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use stockroom_core::CategoryId;
    use stockroom_products::{Category, Product};

    use crate::business::testing::FakeClient;

    fn electronics() -> Category {
        Category {
            id: CategoryId::new(1),
            name: "Electronics".to_string(),
            description: None,
        }
    }

    fn laptop() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Laptop".to_string(),
            description: Some("Gaming laptop".to_string()),
            price: Some(Decimal::new(150000, 2)),
            category: Some(electronics()),
            created_at: Utc::now(),
        }
    }

    fn request(price: i64, stock: Option<i32>) -> ProductRequest {
        ProductRequest {
            name: "Mouse".to_string(),
            description: None,
            price: Some(Decimal::from(price)),
            category: Some(CategoryId::new(1)),
            stock,
        }
    }

    fn service(fake: FakeClient) -> (Arc<FakeClient>, ProductBusinessService) {
        let fake = Arc::new(fake);
        (fake.clone(), ProductBusinessService::new(fake))
    }

    #[tokio::test]
    async fn lists_simplified_views() {
        let (_, svc) = service(FakeClient {
            products: vec![laptop()],
            ..FakeClient::default()
        });

        let views = svc.list().await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].category_name.as_deref(), Some("Electronics"));
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let (_, svc) = service(FakeClient::default());
        let err = svc.get(ProductId::new(999)).await.unwrap_err();
        assert_eq!(err, DomainError::not_found("product not found with id: 999"));
    }

    #[tokio::test]
    async fn transport_failures_become_communication_faults() {
        let (_, svc) = service(FakeClient::offline());

        assert_eq!(svc.list().await.unwrap_err(), DomainError::communication());
        assert_eq!(svc.get(ProductId::new(1)).await.unwrap_err(), DomainError::communication());
        assert_eq!(svc.by_category("Electronics").await.unwrap_err(), DomainError::communication());
    }

    #[tokio::test]
    async fn zero_price_never_reaches_the_data_tier() {
        let (fake, svc) = service(FakeClient::default());

        let err = svc.create(request(0, Some(10))).await.unwrap_err();
        assert_eq!(err, DomainError::validation("price must exceed zero"));
        assert_eq!(fake.product_creates(), 0);
        assert_eq!(fake.inventory_creates(), 0);
    }

    #[tokio::test]
    async fn negative_stock_never_reaches_the_data_tier() {
        let (fake, svc) = service(FakeClient::default());

        let err = svc.create(request(100, Some(-5))).await.unwrap_err();
        assert_eq!(err, DomainError::validation("stock cannot be negative"));
        assert_eq!(fake.product_creates(), 0);
    }

    #[tokio::test]
    async fn create_with_stock_opens_an_inventory_record() {
        let (fake, svc) = service(FakeClient {
            categories: vec![electronics()],
            ..FakeClient::default()
        });

        let view = svc.create(request(25, Some(12))).await.unwrap();
        assert_eq!(view.name, "Mouse");
        assert_eq!(view.category_name.as_deref(), Some("Electronics"));

        let created = fake.created_inventory.lock().unwrap().clone();
        assert_eq!(created, vec![InventoryDraft::for_product(view.id, 12, 0)]);
    }

    #[tokio::test]
    async fn create_without_stock_skips_inventory() {
        let (fake, svc) = service(FakeClient::default());

        svc.create(request(25, None)).await.unwrap();
        assert_eq!(fake.product_creates(), 1);
        assert_eq!(fake.inventory_creates(), 0);
    }

    #[tokio::test]
    async fn create_failure_is_a_communication_fault() {
        let (fake, svc) = service(FakeClient::offline());

        let err = svc.create(request(25, Some(1))).await.unwrap_err();
        assert_eq!(err, DomainError::communication());
        assert_eq!(fake.product_creates(), 1);
        assert_eq!(fake.inventory_creates(), 0);
    }
}
