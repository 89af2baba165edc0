//! Catalog module: categories and products.
//!
//! Plain records with explicit optional fields, plus the creation rules the
//! business tier enforces before anything reaches the data tier. No IO here.

pub mod category;
pub mod product;

pub use category::{Category, CategoryDraft, same_name};
pub use product::{Product, ProductDraft, ProductRequest, ProductView};
