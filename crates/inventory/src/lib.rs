//! Inventory module: stock records and their valuation.
//!
//! Pure logic over records already loaded from the store (or returned by the
//! data tier); no IO, no HTTP, no storage.

pub mod record;
pub mod valuation;

pub use record::{Inventory, InventoryDraft, QuantityUpdate};
pub use valuation::{ValuationSummary, line_value, summarize, total_value};
