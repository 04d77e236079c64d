//! Active-ability slot management.

use std::sync::Arc;

use charsheet_domain::{AbilityId, Character, CharacterId, UserId};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::CharacterRepo;

use super::error::CharacterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SlotAction {
    Assign { slot: usize, ability_id: AbilityId },
    Clear { slot: usize },
    SetCooldown { slot: usize, turns: u32 },
    /// End of turn: every cooldown counts down by one
    TickCooldowns,
}

pub struct ManageAbilitySlots {
    characters: Arc<dyn CharacterRepo>,
}

impl ManageAbilitySlots {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
        action: SlotAction,
    ) -> Result<Character, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        match action {
            SlotAction::Assign { slot, ability_id } => character.assign_ability(slot, ability_id)?,
            SlotAction::Clear { slot } => {
                character.clear_ability_slot(slot)?;
            }
            SlotAction::SetCooldown { slot, turns } => character.set_ability_cooldown(slot, turns)?,
            SlotAction::TickCooldowns => character.tick_cooldowns(),
        }

        self.characters.commit(&character).await?;
        tracing::debug!(character_id = %id, ?action, "Ability slots updated");
        Ok(character)
    }
}
