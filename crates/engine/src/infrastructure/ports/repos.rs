//! Collaborator ports: character storage, inventory and the effect catalog.

use async_trait::async_trait;
use charsheet_domain::{
    Character, CharacterId, InventoryLine, InventoryLineId, StatusEffect, StatusEffectId, UserId,
};

use super::RepoError;

// =============================================================================
// Character Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    /// Load a character if it exists and belongs to `owner`.
    async fn load(&self, id: CharacterId, owner: UserId) -> Result<Option<Character>, RepoError>;

    /// Persist the whole snapshot in one write.
    async fn commit(&self, character: &Character) -> Result<(), RepoError>;

    /// Persist the snapshot and consume one use of an inventory line in the
    /// same write. Either both land or neither does.
    async fn commit_with_consumption(
        &self,
        character: &Character,
        consumption: ItemConsumption,
    ) -> Result<(), RepoError>;
}

// =============================================================================
// Inventory
// =============================================================================

/// One use taken from an inventory line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemConsumption {
    /// More uses remain: quantity goes down by one
    Decrement(InventoryLineId),
    /// Last use: the line is removed
    Delete(InventoryLineId),
}

impl ItemConsumption {
    /// Consumption for a line currently holding `quantity` uses.
    pub fn for_quantity(line: InventoryLineId, quantity: u32) -> Self {
        if quantity > 1 {
            Self::Decrement(line)
        } else {
            Self::Delete(line)
        }
    }
}

/// Read side of the inventory. Consumption goes through
/// [`CharacterRepo::commit_with_consumption`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepo: Send + Sync {
    async fn get_line(
        &self,
        line: InventoryLineId,
        character: CharacterId,
        owner: UserId,
    ) -> Result<Option<InventoryLine>, RepoError>;
}

// =============================================================================
// Status Effect Catalog
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusEffectCatalog: Send + Sync {
    /// Exact, case-sensitive name match.
    async fn find_by_name(&self, name: &str) -> Result<Option<StatusEffect>, RepoError>;

    async fn find_by_id(&self, id: StatusEffectId) -> Result<Option<StatusEffect>, RepoError>;
}
