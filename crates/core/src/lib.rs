//! `stockroom-core`: shared building blocks for both service tiers.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, InventoryId, ProductId};
