//! Create character use case.

use std::collections::BTreeMap;
use std::sync::Arc;

use charsheet_domain::{Character, Skill, SkillScores, UserId};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::CharacterRepo;

use super::error::CharacterError;

/// Raw creation payload as it arrives from the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    /// Skill name to starting score; unlisted skills start at 1
    #[serde(default)]
    pub skills: BTreeMap<String, u8>,
    /// Branch key to starting level, summing to 3
    pub branches: BTreeMap<String, u8>,
}

pub struct CreateCharacter {
    characters: Arc<dyn CharacterRepo>,
}

impl CreateCharacter {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        request: &CreateCharacterRequest,
    ) -> Result<Character, CharacterError> {
        let pairs = request
            .skills
            .iter()
            .map(|(name, value)| name.parse::<Skill>().map(|skill| (skill, *value)))
            .collect::<Result<Vec<_>, _>>()?;
        let skills = SkillScores::from_pairs(pairs)?;

        let character = Character::create(owner, request.name.as_str(), skills, &request.branches)?;
        self.characters.commit(&character).await?;

        tracing::info!(
            character_id = %character.id(),
            owner_id = %owner,
            max_hp = character.max_hp(),
            base_pu = character.base_pu(),
            "Character created"
        );
        Ok(character)
    }
}
