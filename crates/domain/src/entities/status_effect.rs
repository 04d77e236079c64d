//! Status effect records owned by the effect catalog.
//!
//! The rules only rely on `id` (set membership) and `name` (emotion lookup).
//! The modifier fields are carried through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::StatusEffectId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: StatusEffectId,
    pub name: String,
    pub description: String,
    /// "advantage" or "disadvantage"
    #[serde(default)]
    pub roll_modifier_type: Option<String>,
    /// Check or save names the roll modifier applies to
    #[serde(default)]
    pub roll_modifier_targets: Vec<String>,
    #[serde(default)]
    pub ac_modifier: Option<i32>,
    #[serde(default)]
    pub duration_type: Option<String>,
    #[serde(default)]
    pub numeric_modifiers: BTreeMap<String, i32>,
    #[serde(default)]
    pub action_restrictions: BTreeMap<String, bool>,
}

impl StatusEffect {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: StatusEffectId::new(),
            name: name.into(),
            description: description.into(),
            roll_modifier_type: None,
            roll_modifier_targets: Vec::new(),
            ac_modifier: None,
            duration_type: None,
            numeric_modifiers: BTreeMap::new(),
            action_restrictions: BTreeMap::new(),
        }
    }
}
