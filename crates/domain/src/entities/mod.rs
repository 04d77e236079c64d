//! Entities read by the rules but owned by external catalogs

mod item;
mod status_effect;

pub use item::{InventoryLine, Item, ItemCategory};
pub use status_effect::StatusEffect;
