//! Level up use case.

use std::sync::Arc;

use charsheet_domain::{Character, CharacterId, LevelUpRequest, LevelUpSummary, UserId};

use crate::infrastructure::ports::CharacterRepo;

use super::error::CharacterError;

#[derive(Debug, Clone)]
pub struct LevelUpResult {
    pub character: Character,
    pub summary: LevelUpSummary,
}

/// Level up use case.
///
/// Validation and every mutation happen in the domain on a copy; the
/// snapshot is committed only when the whole level applies.
pub struct LevelUp {
    characters: Arc<dyn CharacterRepo>,
}

impl LevelUp {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
        request: &LevelUpRequest,
    ) -> Result<LevelUpResult, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        let summary = character.level_up(request)?;
        self.characters.commit(&character).await?;

        tracing::info!(
            character_id = %id,
            level = summary.new_level,
            branch = %summary.branch,
            hp_gained = summary.hp_gained,
            "Character leveled up"
        );
        Ok(LevelUpResult { character, summary })
    }
}
