//! Legacy order conversion (pure domain logic).
//!
//! This crate turns legacy order records, whose line items are keyed by item
//! name, into normalized orders with an ordered item list and a derived revenue
//! per item. It performs no IO.

pub mod items;
pub mod model;
pub mod order;

pub use items::expand_items;
pub use model::{NormalizedItem, NormalizedOrder};
pub use order::{REQUIRED_FIELDS, normalize_order};
