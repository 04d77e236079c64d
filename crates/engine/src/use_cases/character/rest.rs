//! Short and long rest use cases.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterId, LongRestOutcome, RestRules, ShortRestOutcome, UserId};

use crate::infrastructure::ports::{CharacterRepo, RandomPort};
use crate::infrastructure::random::dice_source;

use super::error::CharacterError;

#[derive(Debug, Clone)]
pub struct ShortRestResult {
    pub character: Character,
    pub outcome: ShortRestOutcome,
}

#[derive(Debug, Clone)]
pub struct LongRestResult {
    pub character: Character,
    pub outcome: LongRestOutcome,
}

/// Spend stamina dice for hit points and roll for composure.
pub struct ShortRest {
    characters: Arc<dyn CharacterRepo>,
    random: Arc<dyn RandomPort>,
    rules: Arc<RestRules>,
}

impl ShortRest {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        random: Arc<dyn RandomPort>,
        rules: Arc<RestRules>,
    ) -> Self {
        Self {
            characters,
            random,
            rules,
        }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
        dice: u32,
    ) -> Result<ShortRestResult, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        let outcome = {
            let mut rng = dice_source(self.random.as_ref());
            character.short_rest(dice, &self.rules, &mut rng)?
        };
        self.characters.commit(&character).await?;

        tracing::info!(
            character_id = %id,
            dice_spent = outcome.dice_spent,
            hp_gained = outcome.hp_gained,
            pu_gained = outcome.pu_gained,
            "Short rest taken"
        );
        Ok(ShortRestResult { character, outcome })
    }
}

/// Full recovery between adventuring days.
pub struct LongRest {
    characters: Arc<dyn CharacterRepo>,
}

impl LongRest {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
    ) -> Result<LongRestResult, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        let outcome = character.long_rest();
        self.characters.commit(&character).await?;

        tracing::info!(
            character_id = %id,
            hp_gained = outcome.hp_gained,
            stamina = outcome.stamina,
            exhaustion = outcome.exhaustion,
            "Long rest taken"
        );
        Ok(LongRestResult { character, outcome })
    }
}
