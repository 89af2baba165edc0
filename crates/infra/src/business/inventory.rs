use std::sync::Arc;

use rust_decimal::Decimal;

use stockroom_core::DomainResult;
use stockroom_inventory::{Inventory, summarize};

use super::communication_fault;
use crate::client::DataServiceClient;

#[derive(Clone)]
pub struct InventoryBusinessService {
    client: Arc<dyn DataServiceClient>,
}

impl InventoryBusinessService {
    pub fn new(client: Arc<dyn DataServiceClient>) -> Self {
        Self { client }
    }

    /// Whatever the data tier reports as low stock; not re-filtered here.
    pub async fn low_stock(&self) -> DomainResult<Vec<Inventory>> {
        self.client
            .low_stock()
            .await
            .map_err(|e| communication_fault("low_stock", e))
    }

    /// Exact total of quantity × price over every valued record.
    ///
    /// A failed fetch or an overflowing total is an error, never a partial total.
    pub async fn total_value(&self) -> DomainResult<Decimal> {
        let records = self
            .client
            .list_inventory()
            .await
            .map_err(|e| communication_fault("list_inventory", e))?;

        tracing::info!(records = records.len(), "computing total inventory value");
        let summary = summarize(&records)?;
        tracing::info!(
            total_value = %summary.total_value,
            valued = summary.valued,
            skipped = summary.skipped,
            "total inventory value computed"
        );

        Ok(summary.total_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_core::{DomainError, InventoryId, ProductId};
    use stockroom_products::Product;

    use crate::business::testing::FakeClient;

    fn record(id: i64, quantity: i32, min_stock: i32, price: Option<i64>) -> Inventory {
        Inventory {
            id: InventoryId::new(id),
            product: Some(Product {
                id: ProductId::new(id),
                name: format!("Product {id}"),
                description: None,
                price: price.map(Decimal::from),
                category: None,
                created_at: Utc::now(),
            }),
            quantity: Some(quantity),
            min_stock: Some(min_stock),
            updated_at: Utc::now(),
        }
    }

    fn service(inventory: Vec<Inventory>) -> InventoryBusinessService {
        InventoryBusinessService::new(Arc::new(FakeClient {
            inventory,
            ..FakeClient::default()
        }))
    }

    #[tokio::test]
    async fn totals_eligible_records() {
        let svc = service(vec![
            record(1, 10, 1, Some(100)),
            record(2, 5, 1, Some(200)),
            record(3, 0, 1, Some(50)),
        ]);
        assert_eq!(svc.total_value().await.unwrap(), Decimal::from(2000));
    }

    #[tokio::test]
    async fn skips_unpriced_products() {
        let svc = service(vec![record(1, 10, 1, Some(100)), record(2, 5, 1, None)]);
        assert_eq!(svc.total_value().await.unwrap(), Decimal::from(1000));
    }

    #[tokio::test]
    async fn empty_inventory_is_worth_zero() {
        assert_eq!(service(vec![]).total_value().await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn overflowing_total_is_an_internal_error() {
        let mut huge = record(1, 1_000_000_000, 1, None);
        if let Some(product) = huge.product.as_mut() {
            product.price = Some(Decimal::from_i128_with_scale(10i128.pow(20), 0));
        }

        let err = service(vec![huge]).total_value().await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[tokio::test]
    async fn low_stock_is_a_passthrough() {
        let svc = service(vec![record(1, 2, 10, Some(1)), record(2, 50, 10, Some(1))]);

        let low = svc.low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, InventoryId::new(1));
    }

    #[tokio::test]
    async fn fetch_failure_is_not_a_partial_total() {
        let svc = InventoryBusinessService::new(Arc::new(FakeClient::offline()));
        assert_eq!(svc.total_value().await.unwrap_err(), DomainError::communication());
        assert_eq!(svc.low_stock().await.unwrap_err(), DomainError::communication());
    }
}
