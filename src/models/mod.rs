//! Data models
//!
//! Rust structs for recipe content and its required quantities.

mod recipe;
mod supply;

pub use recipe::{compare_published, Recipe};
pub use supply::{group_by_quantity, RequiredQuantity, Supply, SupplyName, Tool};
