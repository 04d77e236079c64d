//! Manual status effect management.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterId, StatusEffectId, UserId};

use crate::infrastructure::ports::{CharacterRepo, StatusEffectCatalog};

use super::error::CharacterError;

#[derive(Debug, Clone)]
pub struct EffectChange {
    pub character: Character,
    /// `false` when the set already matched and nothing was written
    pub changed: bool,
}

/// Apply a catalog effect to a character.
pub struct ApplyStatusEffect {
    characters: Arc<dyn CharacterRepo>,
    catalog: Arc<dyn StatusEffectCatalog>,
}

impl ApplyStatusEffect {
    pub fn new(characters: Arc<dyn CharacterRepo>, catalog: Arc<dyn StatusEffectCatalog>) -> Self {
        Self {
            characters,
            catalog,
        }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
        effect: StatusEffectId,
    ) -> Result<EffectChange, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        let record = self
            .catalog
            .find_by_id(effect)
            .await?
            .ok_or(CharacterError::StatusEffectNotFound(effect))?;

        let changed = character.add_status_effect(record.id);
        if changed {
            self.characters.commit(&character).await?;
            tracing::info!(character_id = %id, effect = %record.name, "Status effect applied");
        }
        Ok(EffectChange { character, changed })
    }
}

/// Remove an effect from a character. Unknown ids are a no-op.
pub struct RemoveStatusEffect {
    characters: Arc<dyn CharacterRepo>,
}

impl RemoveStatusEffect {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
        effect: StatusEffectId,
    ) -> Result<EffectChange, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        let changed = character.remove_status_effect(effect);
        if changed {
            self.characters.commit(&character).await?;
            tracing::info!(character_id = %id, effect_id = %effect, "Status effect removed");
        }
        Ok(EffectChange { character, changed })
    }
}
