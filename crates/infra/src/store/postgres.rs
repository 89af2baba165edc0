//! Postgres-backed entity store.
//!
//! One table per entity. References are nullable foreign keys with
//! `ON DELETE SET NULL`, so deleting a category or product leaves dependents
//! in place with an absent reference. Nested entities are resolved with
//! `LEFT JOIN`s; every joined column carries a table prefix (`c_`, `p_`, `i_`).
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database | `Database` (message includes the operation) |
//! | ColumnDecode / ColumnNotFound | `Decode` |
//! | Other | `Database` |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use stockroom_core::{CategoryId, InventoryId, ProductId};
use stockroom_inventory::{Inventory, InventoryDraft};
use stockroom_products::{Category, CategoryDraft, Product, ProductDraft};

use super::r#trait::{CategoryStore, InventoryStore, ProductStore, StoreError};

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT,
        price       NUMERIC,
        category_id BIGINT REFERENCES categories (id) ON DELETE SET NULL,
        created_at  TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inventory (
        id          BIGSERIAL PRIMARY KEY,
        product_id  BIGINT REFERENCES products (id) ON DELETE SET NULL,
        quantity    INTEGER,
        min_stock   INTEGER,
        updated_at  TIMESTAMPTZ NOT NULL
    )
    "#,
];

const CATEGORY_SELECT: &str = r#"
    SELECT c.id AS c_id, c.name AS c_name, c.description AS c_description
    FROM categories c
"#;

const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id AS p_id, p.name AS p_name, p.description AS p_description,
        p.price AS p_price, p.created_at AS p_created_at,
        c.id AS c_id, c.name AS c_name, c.description AS c_description
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

const INVENTORY_SELECT: &str = r#"
    SELECT
        i.id AS i_id, i.quantity AS i_quantity, i.min_stock AS i_min_stock,
        i.updated_at AS i_updated_at,
        p.id AS p_id, p.name AS p_name, p.description AS p_description,
        p.price AS p_price, p.created_at AS p_created_at,
        c.id AS c_id, c.name AS c_name, c.description AS c_description
    FROM inventory i
    LEFT JOIN products p ON p.id = i.product_id
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Postgres-backed entity store.
///
/// Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PostgresEntityStore {
    pool: Arc<PgPool>,
}

impl PostgresEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the tables when missing. Existing data is left untouched.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }

    async fn fetch_categories(
        &self,
        operation: &str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<Vec<Category>, StoreError> {
        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        rows.iter()
            .map(|row| category_from_row(row).and_then(|c| c.ok_or_else(|| missing("c_id"))))
            .collect::<Result<_, _>>()
            .map_err(|e| map_sqlx_error(operation, e))
    }

    async fn fetch_products(
        &self,
        operation: &str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<Vec<Product>, StoreError> {
        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        rows.iter()
            .map(|row| product_from_row(row).and_then(|p| p.ok_or_else(|| missing("p_id"))))
            .collect::<Result<_, _>>()
            .map_err(|e| map_sqlx_error(operation, e))
    }

    async fn fetch_inventory(
        &self,
        operation: &str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<Vec<Inventory>, StoreError> {
        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        rows.iter()
            .map(inventory_from_row)
            .collect::<Result<_, _>>()
            .map_err(|e| map_sqlx_error(operation, e))
    }

    async fn exists(&self, operation: &str, sql: &str, id: i64) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))
    }

    async fn name_taken(&self, operation: &str, sql: &str, name: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(sql)
            .bind(name)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))
    }

    async fn delete(&self, operation: &str, sql: &str, id: i64) -> Result<(), StoreError> {
        sqlx::query(sql)
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for PostgresEntityStore {
    #[instrument(skip(self), err)]
    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_category", e))?;

        Ok(draft.clone().into_category(CategoryId::new(id)))
    }

    #[instrument(skip(self), err)]
    async fn replace_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, StoreError> {
        let updated = sqlx::query("UPDATE categories SET name = $2, description = $3 WHERE id = $1")
            .bind(id.get())
            .bind(&draft.name)
            .bind(&draft.description)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("replace_category", e))?;

        Ok((updated.rows_affected() > 0).then(|| draft.clone().into_category(id)))
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let sql = format!("{CATEGORY_SELECT} WHERE c.id = $1");
        let found = self
            .fetch_categories("find_category", sqlx::query(&sql).bind(id.get()))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        let sql = format!("{CATEGORY_SELECT} WHERE LOWER(c.name) = LOWER($1) ORDER BY c.id LIMIT 1");
        let found = self
            .fetch_categories("find_category_by_name", sqlx::query(&sql).bind(name))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn category_exists(&self, id: CategoryId) -> Result<bool, StoreError> {
        self.exists(
            "category_exists",
            "SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)",
            id.get(),
        )
        .await
    }

    async fn category_name_taken(&self, name: &str) -> Result<bool, StoreError> {
        self.name_taken(
            "category_name_taken",
            "SELECT EXISTS (SELECT 1 FROM categories WHERE LOWER(name) = LOWER($1))",
            name,
        )
        .await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let sql = format!("{CATEGORY_SELECT} ORDER BY c.id");
        self.fetch_categories("list_categories", sqlx::query(&sql)).await
    }

    #[instrument(skip(self), err)]
    async fn delete_category(&self, id: CategoryId) -> Result<(), StoreError> {
        self.delete("delete_category", "DELETE FROM categories WHERE id = $1", id.get())
            .await
    }
}

#[async_trait]
impl ProductStore for PostgresEntityStore {
    #[instrument(skip(self), err)]
    async fn insert_product(
        &self,
        draft: &ProductDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Product, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, price, category_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.category_id.map(CategoryId::get))
        .bind(created_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_product", e))?;

        self.find_product(ProductId::new(id))
            .await?
            .ok_or_else(|| StoreError::Decode(format!("product {id} missing after insert")))
    }

    #[instrument(skip(self), err)]
    async fn replace_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, category_id = $5
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.category_id.map(CategoryId::get))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace_product", e))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_product(id).await
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = $1");
        let found = self
            .fetch_products("find_product", sqlx::query(&sql).bind(id.get()))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn product_exists(&self, id: ProductId) -> Result<bool, StoreError> {
        self.exists(
            "product_exists",
            "SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)",
            id.get(),
        )
        .await
    }

    async fn product_name_taken(&self, name: &str) -> Result<bool, StoreError> {
        self.name_taken(
            "product_name_taken",
            "SELECT EXISTS (SELECT 1 FROM products WHERE LOWER(name) = LOWER($1))",
            name,
        )
        .await
    }

    async fn products_in_category(&self, category_name: &str) -> Result<Vec<Product>, StoreError> {
        let sql = format!("{PRODUCT_SELECT} WHERE c.name = $1 ORDER BY p.id");
        self.fetch_products("products_in_category", sqlx::query(&sql).bind(category_name))
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let sql = format!("{PRODUCT_SELECT} ORDER BY p.id");
        self.fetch_products("list_products", sqlx::query(&sql)).await
    }

    #[instrument(skip(self), err)]
    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        self.delete("delete_product", "DELETE FROM products WHERE id = $1", id.get())
            .await
    }
}

#[async_trait]
impl InventoryStore for PostgresEntityStore {
    #[instrument(skip(self), err)]
    async fn insert_inventory(
        &self,
        draft: &InventoryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Inventory, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO inventory (product_id, quantity, min_stock, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(draft.product_id.map(ProductId::get))
        .bind(draft.quantity)
        .bind(draft.min_stock)
        .bind(updated_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_inventory", e))?;

        self.find_inventory(InventoryId::new(id))
            .await?
            .ok_or_else(|| StoreError::Decode(format!("inventory {id} missing after insert")))
    }

    #[instrument(skip(self), err)]
    async fn replace_inventory(
        &self,
        id: InventoryId,
        draft: &InventoryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Inventory>, StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE inventory
            SET product_id = $2, quantity = $3, min_stock = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(draft.product_id.map(ProductId::get))
        .bind(draft.quantity)
        .bind(draft.min_stock)
        .bind(updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace_inventory", e))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_inventory(id).await
    }

    async fn find_inventory(&self, id: InventoryId) -> Result<Option<Inventory>, StoreError> {
        let sql = format!("{INVENTORY_SELECT} WHERE i.id = $1");
        let found = self
            .fetch_inventory("find_inventory", sqlx::query(&sql).bind(id.get()))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn find_inventory_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Inventory>, StoreError> {
        let sql = format!("{INVENTORY_SELECT} WHERE i.product_id = $1 ORDER BY i.id LIMIT 1");
        let found = self
            .fetch_inventory("find_inventory_by_product", sqlx::query(&sql).bind(product_id.get()))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn inventory_exists(&self, id: InventoryId) -> Result<bool, StoreError> {
        self.exists(
            "inventory_exists",
            "SELECT EXISTS (SELECT 1 FROM inventory WHERE id = $1)",
            id.get(),
        )
        .await
    }

    async fn list_inventory(&self) -> Result<Vec<Inventory>, StoreError> {
        let sql = format!("{INVENTORY_SELECT} ORDER BY i.id");
        self.fetch_inventory("list_inventory", sqlx::query(&sql)).await
    }

    async fn low_stock_inventory(&self) -> Result<Vec<Inventory>, StoreError> {
        let sql = format!("{INVENTORY_SELECT} WHERE i.quantity <= i.min_stock ORDER BY i.id");
        self.fetch_inventory("low_stock_inventory", sqlx::query(&sql)).await
    }

    async fn inventory_with_quantity(&self, quantity: i32) -> Result<Vec<Inventory>, StoreError> {
        let sql = format!("{INVENTORY_SELECT} WHERE i.quantity = $1 ORDER BY i.id");
        self.fetch_inventory("inventory_with_quantity", sqlx::query(&sql).bind(quantity))
            .await
    }

    async fn inventory_with_product(&self) -> Result<Vec<Inventory>, StoreError> {
        let sql = format!("{INVENTORY_SELECT} WHERE i.product_id IS NOT NULL ORDER BY i.id");
        self.fetch_inventory("inventory_with_product", sqlx::query(&sql)).await
    }

    #[instrument(skip(self), err)]
    async fn delete_inventory(&self, id: InventoryId) -> Result<(), StoreError> {
        self.delete("delete_inventory", "DELETE FROM inventory WHERE id = $1", id.get())
            .await
    }
}

fn missing(column: &str) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("{column} is null").into(),
    }
}

/// `None` when the left join found no category.
fn category_from_row(row: &PgRow) -> Result<Option<Category>, sqlx::Error> {
    let Some(id) = row.try_get::<Option<i64>, _>("c_id")? else {
        return Ok(None);
    };
    Ok(Some(Category {
        id: CategoryId::new(id),
        name: row.try_get("c_name")?,
        description: row.try_get("c_description")?,
    }))
}

/// `None` when the left join found no product.
fn product_from_row(row: &PgRow) -> Result<Option<Product>, sqlx::Error> {
    let Some(id) = row.try_get::<Option<i64>, _>("p_id")? else {
        return Ok(None);
    };
    Ok(Some(Product {
        id: ProductId::new(id),
        name: row.try_get("p_name")?,
        description: row.try_get("p_description")?,
        price: row.try_get("p_price")?,
        category: category_from_row(row)?,
        created_at: row.try_get("p_created_at")?,
    }))
}

fn inventory_from_row(row: &PgRow) -> Result<Inventory, sqlx::Error> {
    Ok(Inventory {
        id: InventoryId::new(row.try_get("i_id")?),
        product: product_from_row(row)?,
        quantity: row.try_get("i_quantity")?,
        min_stock: row.try_get("i_min_stock")?,
        updated_at: row.try_get("i_updated_at")?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            StoreError::Database(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Decode(format!("{operation}: {err}"))
        }
        _ => StoreError::Database(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_column_keeps_full_precision() {
        let products = SCHEMA
            .iter()
            .find(|ddl| ddl.contains("CREATE TABLE IF NOT EXISTS products"))
            .unwrap();
        assert!(products.contains("price       NUMERIC,"));
        assert!(!products.contains("NUMERIC("));
    }
}
