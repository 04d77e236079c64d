//! In-memory adapters for the collaborator ports.
//!
//! Used by the demo binary and by integration-style tests. Each map entry is
//! replaced whole on commit, so readers never observe a half-written sheet.
//! The character store shares the inventory store so a medkit use and the
//! healed sheet land together.

use std::sync::Arc;

use async_trait::async_trait;
use charsheet_domain::{
    Character, CharacterId, InventoryLine, InventoryLineId, StatusEffect, StatusEffectId, UserId,
    NEGATIVE_EMOTIONS, POSITIVE_EMOTIONS,
};
use dashmap::DashMap;

use crate::infrastructure::ports::{
    CharacterRepo, InventoryRepo, ItemConsumption, RepoError, StatusEffectCatalog,
};

// =============================================================================
// Characters
// =============================================================================

pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, Character>,
    inventory: Arc<InMemoryInventoryRepo>,
}

impl InMemoryCharacterRepo {
    pub fn new(inventory: Arc<InMemoryInventoryRepo>) -> Self {
        Self {
            characters: DashMap::new(),
            inventory,
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn load(&self, id: CharacterId, owner: UserId) -> Result<Option<Character>, RepoError> {
        Ok(self
            .characters
            .get(&id)
            .filter(|entry| entry.is_owned_by(owner))
            .map(|entry| entry.value().clone()))
    }

    async fn commit(&self, character: &Character) -> Result<(), RepoError> {
        self.characters.insert(character.id(), character.clone());
        Ok(())
    }

    async fn commit_with_consumption(
        &self,
        character: &Character,
        consumption: ItemConsumption,
    ) -> Result<(), RepoError> {
        // The only fallible step runs first; the insert cannot fail.
        self.inventory.consume(consumption)?;
        self.characters.insert(character.id(), character.clone());
        Ok(())
    }
}

// =============================================================================
// Inventory
// =============================================================================

struct StoredLine {
    character: CharacterId,
    owner: UserId,
    line: InventoryLine,
}

#[derive(Default)]
pub struct InMemoryInventoryRepo {
    lines: DashMap<InventoryLineId, StoredLine>,
}

impl InMemoryInventoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a line into a character's inventory. Returns its id.
    pub fn add_line(&self, character: &Character, line: InventoryLine) -> InventoryLineId {
        let id = line.id;
        self.lines.insert(
            id,
            StoredLine {
                character: character.id(),
                owner: character.owner_id(),
                line,
            },
        );
        id
    }

    pub fn quantity(&self, line: InventoryLineId) -> Option<u32> {
        self.lines.get(&line).map(|stored| stored.line.quantity)
    }

    fn consume(&self, consumption: ItemConsumption) -> Result<(), RepoError> {
        match consumption {
            ItemConsumption::Decrement(line) => {
                let mut stored = self
                    .lines
                    .get_mut(&line)
                    .ok_or_else(|| RepoError::not_found("InventoryLine", line))?;
                stored.line.quantity = stored.line.quantity.saturating_sub(1);
            }
            ItemConsumption::Delete(line) => {
                self.lines
                    .remove(&line)
                    .ok_or_else(|| RepoError::not_found("InventoryLine", line))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryRepo for InMemoryInventoryRepo {
    async fn get_line(
        &self,
        line: InventoryLineId,
        character: CharacterId,
        owner: UserId,
    ) -> Result<Option<InventoryLine>, RepoError> {
        Ok(self
            .lines
            .get(&line)
            .filter(|stored| stored.character == character && stored.owner == owner)
            .map(|stored| stored.line.clone()))
    }
}

// =============================================================================
// Status Effect Catalog
// =============================================================================

#[derive(Default)]
pub struct InMemoryStatusEffectCatalog {
    effects: DashMap<StatusEffectId, StatusEffect>,
}

impl InMemoryStatusEffectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding one record per emotion-table entry.
    pub fn with_emotions() -> Self {
        let catalog = Self::new();
        for name in NEGATIVE_EMOTIONS.iter().chain(POSITIVE_EMOTIONS.iter()) {
            catalog.insert(StatusEffect::new(*name, format!("Overwhelmed by {}", name.to_lowercase())));
        }
        catalog
    }

    pub fn insert(&self, effect: StatusEffect) -> StatusEffectId {
        let id = effect.id;
        self.effects.insert(id, effect);
        id
    }
}

#[async_trait]
impl StatusEffectCatalog for InMemoryStatusEffectCatalog {
    async fn find_by_name(&self, name: &str) -> Result<Option<StatusEffect>, RepoError> {
        Ok(self
            .effects
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: StatusEffectId) -> Result<Option<StatusEffect>, RepoError> {
        Ok(self.effects.get(&id).map(|entry| entry.value().clone()))
    }
}
