//! Entity store boundary.
//!
//! Keyed CRUD plus the handful of predicate queries the data tier needs, over
//! categories, products and inventory records. Two backends: in-memory for
//! dev/tests and PostgreSQL.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryEntityStore;
pub use postgres::PostgresEntityStore;
pub use r#trait::{CategoryStore, EntityStore, InventoryStore, ProductStore, StoreError};
