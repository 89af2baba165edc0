use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryId, ProductId};
use stockroom_products::Product;

/// A stored inventory record with its product nested.
///
/// `product` and `quantity` may be absent in malformed records; consumers
/// must cope with both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: InventoryId,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub quantity: Option<i32>,
    /// Stock-minimum threshold.
    #[serde(default)]
    pub min_stock: Option<i32>,
    /// Stamped by the data tier on every write.
    pub updated_at: DateTime<Utc>,
}

impl Inventory {
    /// Low stock: quantity at or below the minimum. Unknown values never qualify.
    pub fn is_low_stock(&self) -> bool {
        matches!((self.quantity, self.min_stock), (Some(q), Some(min)) if q <= min)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == Some(0)
    }

    /// Whether at least `required` units are on hand.
    pub fn has_at_least(&self, required: i32) -> bool {
        self.quantity.is_some_and(|q| q >= required)
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product.as_ref().map(|p| p.id)
    }
}

/// Write payload for creating or replacing an inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDraft {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub min_stock: Option<i32>,
}

impl InventoryDraft {
    pub fn for_product(product_id: ProductId, quantity: i32, min_stock: i32) -> Self {
        Self {
            product_id: Some(product_id),
            quantity: Some(quantity),
            min_stock: Some(min_stock),
        }
    }
}

/// Body of a quantity-only update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quantity: Option<i32>, min_stock: Option<i32>) -> Inventory {
        Inventory {
            id: InventoryId::new(1),
            product: None,
            quantity,
            min_stock,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn low_stock_includes_the_threshold() {
        assert!(record(Some(2), Some(10)).is_low_stock());
        assert!(record(Some(10), Some(10)).is_low_stock());
        assert!(!record(Some(11), Some(10)).is_low_stock());
    }

    #[test]
    fn unknown_values_are_never_low_stock() {
        assert!(!record(None, Some(10)).is_low_stock());
        assert!(!record(Some(0), None).is_low_stock());
    }

    #[test]
    fn out_of_stock_means_exactly_zero() {
        assert!(record(Some(0), Some(1)).is_out_of_stock());
        assert!(!record(Some(-1), Some(1)).is_out_of_stock());
        assert!(!record(None, Some(1)).is_out_of_stock());
    }

    #[test]
    fn sufficiency_requires_a_known_quantity() {
        assert!(record(Some(5), None).has_at_least(5));
        assert!(!record(Some(4), None).has_at_least(5));
        assert!(!record(None, None).has_at_least(0));
    }

    #[test]
    fn malformed_records_deserialize_with_absent_fields() {
        let json = r#"{"id":3,"product":null,"updated_at":"2025-01-15T14:22:00Z"}"#;
        let inv: Inventory = serde_json::from_str(json).unwrap();
        assert_eq!(inv.product, None);
        assert_eq!(inv.quantity, None);
        assert_eq!(inv.min_stock, None);
    }
}
