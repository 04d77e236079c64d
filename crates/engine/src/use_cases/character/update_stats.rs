//! Direct stat edits, including the composure trigger.

use std::sync::Arc;

use charsheet_domain::{
    Character, CharacterId, PuOutcome, StatUpdate, TriggerState, UserId, EMOTION_DIE,
};

use crate::infrastructure::ports::{CharacterRepo, RandomPort, StatusEffectCatalog};

use super::error::CharacterError;

#[derive(Debug, Clone)]
pub struct UpdateStatsResult {
    pub character: Character,
    /// Name of the emotion effect newly applied by a composure extreme
    pub triggered_emotion: Option<String>,
    /// `false` when the update carried no fields and nothing was written
    pub committed: bool,
}

/// Update stats use case.
///
/// A composure change that hits an extreme arms the emotion trigger: a d6
/// picks an emotion, the catalog resolves it by name and the effect is added
/// unless already active. Everything lands in a single commit.
pub struct UpdateStats {
    characters: Arc<dyn CharacterRepo>,
    catalog: Arc<dyn StatusEffectCatalog>,
    random: Arc<dyn RandomPort>,
}

impl UpdateStats {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        catalog: Arc<dyn StatusEffectCatalog>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            characters,
            catalog,
            random,
        }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
        update: &StatUpdate,
    ) -> Result<UpdateStatsResult, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        let outcome = character.apply_stat_update(update);
        if !outcome.updated {
            return Ok(UpdateStatsResult {
                character,
                triggered_emotion: None,
                committed: false,
            });
        }

        let triggered_emotion = match outcome.pu {
            Some(pu) => self.resolve_trigger(&mut character, &pu).await?,
            None => None,
        };

        self.characters.commit(&character).await?;

        tracing::debug!(
            character_id = %id,
            current_hp = character.current_hp(),
            current_pu = character.current_pu(),
            triggered = ?triggered_emotion,
            "Stats updated"
        );
        Ok(UpdateStatsResult {
            character,
            triggered_emotion,
            committed: true,
        })
    }

    async fn resolve_trigger(
        &self,
        character: &mut Character,
        outcome: &PuOutcome,
    ) -> Result<Option<String>, CharacterError> {
        let state = TriggerState::arm(outcome);
        if state == TriggerState::Idle {
            return Ok(None);
        }

        let roll = self.random.gen_range(1, EMOTION_DIE);
        let state = state.draw(roll)?;

        let found = match state.selected_name() {
            Some(name) => {
                let found = self.catalog.find_by_name(name).await?;
                if found.is_none() {
                    tracing::warn!(
                        character_id = %character.id(),
                        emotion = name,
                        "Emotion missing from the status effect catalog"
                    );
                }
                found
            }
            None => None,
        };

        let applied = character.resolve_trigger(state, found.as_ref())?.into_applied();
        if let Some(name) = &applied {
            tracing::info!(
                character_id = %character.id(),
                emotion = %name,
                roll,
                "Emotion triggered"
            );
        }
        Ok(applied)
    }
}
