//! Character operation errors.

use charsheet_domain::{CharacterId, DomainError, ErrorKind, InventoryLineId, StatusEffectId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Inventory line not found: {0}")]
    InventoryLineNotFound(InventoryLineId),

    #[error("Item '{0}' is not a consumable")]
    WrongItemCategory(String),

    #[error("Item '{0}' has no uses left")]
    Depleted(String),

    #[error("Status effect not found: {0}")]
    StatusEffectNotFound(StatusEffectId),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl CharacterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CharacterNotFound(_)
            | Self::InventoryLineNotFound(_)
            | Self::StatusEffectNotFound(_) => ErrorKind::InvalidReference,
            Self::WrongItemCategory(_) => ErrorKind::Validation,
            Self::Depleted(_) => ErrorKind::InsufficientResource,
            Self::Domain(err) => err.kind(),
            Self::Repo(err) => err.kind(),
        }
    }
}
