//! Character sheet reads and free-text notes.

use std::sync::Arc;

use charsheet_domain::{
    Character, CharacterId, InventoryLine, InventoryLineId, NotesUpdate, StatusEffect, UserId,
};
use serde::Serialize;

use crate::infrastructure::ports::{CharacterRepo, InventoryRepo, StatusEffectCatalog};

use super::error::CharacterError;

/// Values computed from the raw scores and the worn equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    pub initiative_bonus: i32,
    pub base_armor_class: i32,
    pub total_armor_class: i32,
    pub passive_attention: i32,
    /// Remaining XP, `None` at the level cap
    pub experience_to_next_level: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet {
    pub character: Character,
    pub derived: DerivedStats,
    /// Catalog records of the active effects. Ids the catalog no longer
    /// knows are skipped.
    pub active_effects: Vec<StatusEffect>,
}

/// Assemble the full sheet view.
pub struct GetCharacterSheet {
    characters: Arc<dyn CharacterRepo>,
    inventory: Arc<dyn InventoryRepo>,
    catalog: Arc<dyn StatusEffectCatalog>,
}

impl GetCharacterSheet {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        inventory: Arc<dyn InventoryRepo>,
        catalog: Arc<dyn StatusEffectCatalog>,
    ) -> Self {
        Self {
            characters,
            inventory,
            catalog,
        }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
    ) -> Result<CharacterSheet, CharacterError> {
        let character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        let armor = self
            .equipped_line(&character, character.equipment().armor)
            .await?;
        let shield = self
            .equipped_line(&character, character.equipment().shield)
            .await?;

        let derived = DerivedStats {
            initiative_bonus: character.initiative_bonus(),
            base_armor_class: character.base_armor_class(),
            total_armor_class: character.total_armor_class(armor.as_ref(), shield.as_ref()),
            passive_attention: character.passive_attention(),
            experience_to_next_level: character.experience_to_next_level(),
        };

        let mut active_effects = Vec::with_capacity(character.active_effects().len());
        for effect_id in character.active_effects().iter() {
            match self.catalog.find_by_id(effect_id).await? {
                Some(effect) => active_effects.push(effect),
                None => tracing::warn!(
                    character_id = %id,
                    effect_id = %effect_id,
                    "Active effect missing from the catalog"
                ),
            }
        }

        Ok(CharacterSheet {
            character,
            derived,
            active_effects,
        })
    }

    async fn equipped_line(
        &self,
        character: &Character,
        slot: Option<InventoryLineId>,
    ) -> Result<Option<InventoryLine>, CharacterError> {
        let Some(line) = slot else {
            return Ok(None);
        };
        Ok(self
            .inventory
            .get_line(line, character.id(), character.owner_id())
            .await?)
    }
}

/// Overwrite the supplied note fields.
pub struct UpdateNotes {
    characters: Arc<dyn CharacterRepo>,
}

impl UpdateNotes {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
        update: NotesUpdate,
    ) -> Result<Character, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        if !character.update_notes(update) {
            tracing::debug!(character_id = %id, "No note fields supplied, nothing written");
            return Ok(character);
        }
        self.characters.commit(&character).await?;
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, MockInventoryRepo, MockStatusEffectCatalog};
    use crate::use_cases::character::fixtures::{expect_load, sample_character};
    use charsheet_domain::{EquipmentSlots, Item, ItemCategory};

    #[tokio::test]
    async fn sheet_includes_worn_armor_and_effects() {
        let armor = InventoryLine::new(
            Item::new(
                "Chain shirt",
                ItemCategory::Armor {
                    ac_bonus: 3,
                    max_dex_bonus: Some(1),
                },
            ),
            1,
        );
        let shield = InventoryLine::new(Item::new("Buckler", ItemCategory::Shield { ac_bonus: 1 }), 1);
        let (armor_id, shield_id) = (armor.id, shield.id);
        let fear = StatusEffect::new("Fear", "Cannot approach the source");
        let fear_id = fear.id;

        let mut character = sample_character().with_equipment(EquipmentSlots {
            armor: Some(armor_id),
            shield: Some(shield_id),
            ..Default::default()
        });
        character.add_status_effect(fear_id);
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit().never();

        let mut inventory = MockInventoryRepo::new();
        inventory.expect_get_line().returning(move |line, _, _| {
            if line == armor_id {
                Ok(Some(armor.clone()))
            } else if line == shield_id {
                Ok(Some(shield.clone()))
            } else {
                Ok(None)
            }
        });

        let mut catalog = MockStatusEffectCatalog::new();
        catalog
            .expect_find_by_id()
            .returning(move |_| Ok(Some(fear.clone())));

        let use_case = GetCharacterSheet::new(Arc::new(repo), Arc::new(inventory), Arc::new(catalog));
        let sheet = use_case.execute(id, owner).await.unwrap();

        assert_eq!(sheet.derived.initiative_bonus, 2);
        assert_eq!(sheet.derived.base_armor_class, 12);
        // 10 + min(dex +2, 1) + 3 + 1
        assert_eq!(sheet.derived.total_armor_class, 15);
        assert_eq!(sheet.derived.passive_attention, 14);
        assert_eq!(sheet.derived.experience_to_next_level, Some(300));
        assert_eq!(sheet.active_effects.len(), 1);
        assert_eq!(sheet.active_effects[0].name, "Fear");
    }

    #[tokio::test]
    async fn sheet_without_equipment_skips_inventory() {
        let character = sample_character();
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);

        let mut inventory = MockInventoryRepo::new();
        inventory.expect_get_line().never();

        let use_case = GetCharacterSheet::new(
            Arc::new(repo),
            Arc::new(inventory),
            Arc::new(MockStatusEffectCatalog::new()),
        );
        let sheet = use_case.execute(id, owner).await.unwrap();
        assert_eq!(sheet.derived.total_armor_class, sheet.derived.base_armor_class);
        assert!(sheet.active_effects.is_empty());
    }

    #[tokio::test]
    async fn notes_are_committed() {
        let character = sample_character();
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit()
            .withf(|c: &Character| c.notes().background.as_deref() == Some("Raised by smugglers"))
            .times(1)
            .returning(|_| Ok(()));

        let use_case = UpdateNotes::new(Arc::new(repo));
        let character = use_case
            .execute(
                id,
                owner,
                NotesUpdate {
                    background: Some("Raised by smugglers".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(character.notes().appearance, None);
    }

    #[tokio::test]
    async fn empty_notes_update_skips_the_commit() {
        let character = sample_character();
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character.clone());
        repo.expect_commit().never();

        let use_case = UpdateNotes::new(Arc::new(repo));
        let unchanged = use_case
            .execute(id, owner, NotesUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged, character);
    }
}
