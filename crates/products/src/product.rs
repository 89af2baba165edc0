use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, DomainError, DomainResult, ProductId};

use crate::category::Category;

/// A stored product, as the data tier returns it (category nested).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price. Absent only in malformed records.
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
}

/// Write payload for creating or replacing a product on the data tier.
///
/// The category is referenced by id; the data tier resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            price: Some(price),
            category_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Product creation request accepted by the business tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Category reference (by id).
    #[serde(default)]
    pub category: Option<CategoryId>,
    /// Initial stock; when present the product gets an inventory record.
    #[serde(default)]
    pub stock: Option<i32>,
}

impl ProductRequest {
    /// Business rules checked before the request may reach the data tier.
    pub fn validate(&self) -> DomainResult<()> {
        match self.price {
            Some(price) if price > Decimal::ZERO => {}
            _ => return Err(DomainError::validation("price must exceed zero")),
        }

        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(DomainError::validation("stock cannot be negative"));
            }
        }

        Ok(())
    }

    /// The data-tier payload for this request.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category_id: self.category,
        }
    }
}

/// Simplified product representation returned by the business tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_name: Option<String>,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            category_name: p.category.map(|c| c.name),
        }
    }
}
