//! Application state and composition.

use std::sync::Arc;

use charsheet_domain::RestRules;

use crate::infrastructure::ports::{CharacterRepo, InventoryRepo, RandomPort, StatusEffectCatalog};
use crate::use_cases::{self, character};

/// Main application state.
///
/// Holds the collaborator ports and every use case wired against them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Collaborator ports, injected directly.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub inventory: Arc<dyn InventoryRepo>,
    pub catalog: Arc<dyn StatusEffectCatalog>,
}

/// Container for all use cases.
pub struct UseCases {
    pub character: use_cases::CharacterUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        inventory_repo: Arc<dyn InventoryRepo>,
        catalog: Arc<dyn StatusEffectCatalog>,
        random: Arc<dyn RandomPort>,
        rules: RestRules,
    ) -> Self {
        let rules = Arc::new(rules);

        let character = use_cases::CharacterUseCases {
            create: Arc::new(character::CreateCharacter::new(character_repo.clone())),
            sheet: Arc::new(character::GetCharacterSheet::new(
                character_repo.clone(),
                inventory_repo.clone(),
                catalog.clone(),
            )),
            notes: Arc::new(character::UpdateNotes::new(character_repo.clone())),
            level_up: Arc::new(character::LevelUp::new(character_repo.clone())),
            update_stats: Arc::new(character::UpdateStats::new(
                character_repo.clone(),
                catalog.clone(),
                random.clone(),
            )),
            apply_effect: Arc::new(character::ApplyStatusEffect::new(
                character_repo.clone(),
                catalog.clone(),
            )),
            remove_effect: Arc::new(character::RemoveStatusEffect::new(character_repo.clone())),
            short_rest: Arc::new(character::ShortRest::new(
                character_repo.clone(),
                random.clone(),
                rules.clone(),
            )),
            long_rest: Arc::new(character::LongRest::new(character_repo.clone())),
            heal: Arc::new(character::Heal::new(
                character_repo.clone(),
                inventory_repo.clone(),
                random,
                rules,
            )),
            ability_slots: Arc::new(character::ManageAbilitySlots::new(character_repo.clone())),
        };

        Self {
            repositories: Repositories {
                character: character_repo,
                inventory: inventory_repo,
                catalog,
            },
            use_cases: UseCases { character },
        }
    }
}
