//! Character use cases.
//!
//! Every operation follows the same shape: load the sheet scoped to its
//! owner, run the rule in the domain, commit the whole snapshot once.
//! Rejected operations never reach `commit`.

mod ability_slots;
mod create;
mod error;
mod heal;
mod level_up;
mod rest;
mod sheet;
mod status_effects;
mod update_stats;

pub use ability_slots::{ManageAbilitySlots, SlotAction};
pub use create::{CreateCharacter, CreateCharacterRequest};
pub use error::CharacterError;
pub use heal::{Heal, HealRequest, HealResult};
pub use level_up::{LevelUp, LevelUpResult};
pub use rest::{LongRest, LongRestResult, ShortRest, ShortRestResult};
pub use sheet::{CharacterSheet, DerivedStats, GetCharacterSheet, UpdateNotes};
pub use status_effects::{ApplyStatusEffect, EffectChange, RemoveStatusEffect};
pub use update_stats::{UpdateStats, UpdateStatsResult};

use std::sync::Arc;

/// Container for character use cases.
pub struct CharacterUseCases {
    pub create: Arc<CreateCharacter>,
    pub sheet: Arc<GetCharacterSheet>,
    pub notes: Arc<UpdateNotes>,
    pub level_up: Arc<LevelUp>,
    pub update_stats: Arc<UpdateStats>,
    pub apply_effect: Arc<ApplyStatusEffect>,
    pub remove_effect: Arc<RemoveStatusEffect>,
    pub short_rest: Arc<ShortRest>,
    pub long_rest: Arc<LongRest>,
    pub heal: Arc<Heal>,
    pub ability_slots: Arc<ManageAbilitySlots>,
}
