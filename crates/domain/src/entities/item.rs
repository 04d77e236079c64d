//! Item entity - what the rules read from the equipment catalog
//!
//! The catalog's item hierarchy is a closed set of categories, modelled as a
//! tagged enum so rules dispatch on the tag instead of inspecting types.

use serde::{Deserialize, Serialize};

use crate::ids::{InventoryLineId, ItemId};

/// Category-specific fields of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ItemCategory {
    Weapon {
        damage: String,
    },
    Armor {
        ac_bonus: i32,
        /// Cap on the dexterity part of armor class while worn
        max_dex_bonus: Option<i32>,
    },
    Shield {
        ac_bonus: i32,
    },
    /// Consumables and gear; `effect_formula` drives medkit healing
    General {
        effect_formula: Option<String>,
    },
    Ammo {
        ammo_type: String,
    },
}

impl ItemCategory {
    pub fn tag(&self) -> &'static str {
        match self {
            ItemCategory::Weapon { .. } => "weapon",
            ItemCategory::Armor { .. } => "armor",
            ItemCategory::Shield { .. } => "shield",
            ItemCategory::General { .. } => "general",
            ItemCategory::Ammo { .. } => "ammo",
        }
    }
}

/// A catalog item, reduced to the fields the rules read
///
/// Simple data struct: any combination of values is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(flatten)]
    pub category: ItemCategory,
}

impl Item {
    pub fn new(name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            category,
        }
    }
}

/// One line of a character's inventory: an item and how many of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub id: InventoryLineId,
    pub item: Item,
    pub quantity: u32,
}

impl InventoryLine {
    pub fn new(item: Item, quantity: u32) -> Self {
        Self {
            id: InventoryLineId::new(),
            item,
            quantity,
        }
    }
}
