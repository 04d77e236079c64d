//! Healing use case: medkits and stamina dice.

use std::sync::Arc;

use charsheet_domain::{
    Character, CharacterId, HealOutcome, InventoryLineId, ItemCategory, RestRules, UserId,
};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{CharacterRepo, InventoryRepo, ItemConsumption, RandomPort};
use crate::infrastructure::random::dice_source;

use super::error::CharacterError;

/// Where the healing comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum HealRequest {
    /// Consume one use of a general item and roll its effect formula
    Medkit { inventory_item_id: InventoryLineId },
    /// Spend stamina dice; a missing or zero count spends one
    ShortRestDie {
        #[serde(default)]
        dice_count: Option<u32>,
    },
}

impl HealRequest {
    fn source(&self) -> &'static str {
        match self {
            Self::Medkit { .. } => "medkit",
            Self::ShortRestDie { .. } => "short_rest_die",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealResult {
    pub character: Character,
    pub source: &'static str,
    pub healed: i32,
    pub rolled: i32,
    /// A medkit use or stamina dice were spent
    pub resource_consumed: bool,
    pub breakdown: String,
}

/// Heal use case.
///
/// A character already at full HP is returned unchanged and no resource is
/// consumed. Otherwise the resource is always spent, even if the roll heals
/// nothing. A medkit use is committed together with the healed character.
pub struct Heal {
    characters: Arc<dyn CharacterRepo>,
    inventory: Arc<dyn InventoryRepo>,
    random: Arc<dyn RandomPort>,
    rules: Arc<RestRules>,
}

impl Heal {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        inventory: Arc<dyn InventoryRepo>,
        random: Arc<dyn RandomPort>,
        rules: Arc<RestRules>,
    ) -> Self {
        Self {
            characters,
            inventory,
            random,
            rules,
        }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        owner: UserId,
        request: &HealRequest,
    ) -> Result<HealResult, CharacterError> {
        let mut character = self
            .characters
            .load(id, owner)
            .await?
            .ok_or(CharacterError::CharacterNotFound(id))?;

        if character.is_at_full_hp() {
            tracing::debug!(character_id = %id, "Already at full HP, nothing consumed");
            return Ok(HealResult {
                character,
                source: request.source(),
                healed: 0,
                rolled: 0,
                resource_consumed: false,
                breakdown: "already at full HP".to_string(),
            });
        }

        let (outcome, consumption) = match request {
            HealRequest::Medkit { inventory_item_id } => {
                let (outcome, consumption) = self
                    .use_medkit(&mut character, *inventory_item_id, owner)
                    .await?;
                (outcome, Some(consumption))
            }
            HealRequest::ShortRestDie { dice_count } => {
                let dice = dice_count.filter(|count| *count > 0).unwrap_or(1);
                let mut rng = dice_source(self.random.as_ref());
                let outcome = character.heal_with_stamina_dice(dice, &self.rules, &mut rng)?;
                (outcome, None)
            }
        };

        match consumption {
            Some(consumption) => {
                self.characters
                    .commit_with_consumption(&character, consumption)
                    .await?
            }
            None => self.characters.commit(&character).await?,
        }

        tracing::info!(
            character_id = %id,
            source = request.source(),
            rolled = outcome.rolled,
            healed = outcome.healed,
            "Character healed"
        );
        Ok(HealResult {
            character,
            source: request.source(),
            healed: outcome.healed,
            rolled: outcome.rolled,
            resource_consumed: true,
            breakdown: outcome.breakdown,
        })
    }

    async fn use_medkit(
        &self,
        character: &mut Character,
        line_id: InventoryLineId,
        owner: UserId,
    ) -> Result<(HealOutcome, ItemConsumption), CharacterError> {
        let line = self
            .inventory
            .get_line(line_id, character.id(), owner)
            .await?
            .ok_or(CharacterError::InventoryLineNotFound(line_id))?;

        let ItemCategory::General { effect_formula } = &line.item.category else {
            return Err(CharacterError::WrongItemCategory(line.item.name.clone()));
        };
        if line.quantity == 0 {
            return Err(CharacterError::Depleted(line.item.name.clone()));
        }

        let outcome = {
            let mut rng = dice_source(self.random.as_ref());
            character.heal_with_formula(effect_formula.as_deref(), &mut rng)
        };
        if let Some(err) = &outcome.formula_error {
            tracing::warn!(
                character_id = %character.id(),
                item = %line.item.name,
                error = %err,
                "Medkit formula could not be rolled"
            );
        }

        let consumption = ItemConsumption::for_quantity(line.id, line.quantity);
        if let ItemConsumption::Delete(line_id) = consumption {
            character.clear_equipment_references(line_id);
        }
        Ok((outcome, consumption))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryInventoryRepo;
    use crate::infrastructure::ports::{MockCharacterRepo, MockInventoryRepo, RepoError};
    use crate::infrastructure::random::{FixedRandom, ScriptedRandom};
    use crate::use_cases::character::fixtures::{expect_load, sample_character};
    use charsheet_domain::{DomainError, EquipmentSlots, ErrorKind, InventoryLine, Item};

    fn medkit(quantity: u32, formula: Option<&str>) -> InventoryLine {
        InventoryLine::new(
            Item::new(
                "Medkit",
                ItemCategory::General {
                    effect_formula: formula.map(str::to_string),
                },
            ),
            quantity,
        )
    }

    fn heal(
        repo: MockCharacterRepo,
        inventory: impl InventoryRepo + 'static,
        random: Arc<dyn RandomPort>,
    ) -> Heal {
        Heal::new(
            Arc::new(repo),
            Arc::new(inventory),
            random,
            Arc::new(RestRules::default()),
        )
    }

    #[tokio::test]
    async fn medkit_heals_and_decrements() {
        let character = sample_character().with_current_hp(3);
        let (id, owner) = (character.id(), character.owner_id());
        let line = medkit(3, Some("2d4+2"));
        let line_id = line.id;

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit_with_consumption()
            .withf(move |c: &Character, consumption: &ItemConsumption| {
                c.current_hp() == 10 && *consumption == ItemConsumption::Decrement(line_id)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_commit().never();

        let mut inventory = MockInventoryRepo::new();
        inventory
            .expect_get_line()
            .withf(move |l, c, o| *l == line_id && *c == id && *o == owner)
            .returning(move |_, _, _| Ok(Some(line.clone())));

        let result = heal(repo, inventory, Arc::new(ScriptedRandom::new([3, 2])))
            .execute(id, owner, &HealRequest::Medkit { inventory_item_id: line_id })
            .await
            .unwrap();

        assert_eq!(result.rolled, 7);
        assert_eq!(result.healed, 7);
        assert!(result.resource_consumed);
        assert_eq!(result.source, "medkit");
        assert_eq!(result.breakdown, "2d4[3, 2] + 2 = 7");
    }

    #[tokio::test]
    async fn last_medkit_is_deleted_and_unequipped() {
        let line = medkit(1, Some("1d4"));
        let line_id = line.id;
        let character = sample_character()
            .with_current_hp(3)
            .with_equipment(EquipmentSlots {
                weapon2: Some(line_id),
                ..Default::default()
            });
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit_with_consumption()
            .withf(move |c: &Character, consumption: &ItemConsumption| {
                c.equipment().weapon2.is_none()
                    && *consumption == ItemConsumption::Delete(line_id)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut inventory = MockInventoryRepo::new();
        inventory
            .expect_get_line()
            .returning(move |_, _, _| Ok(Some(line.clone())));

        let result = heal(repo, inventory, Arc::new(FixedRandom(2)))
            .execute(id, owner, &HealRequest::Medkit { inventory_item_id: line_id })
            .await
            .unwrap();
        assert_eq!(result.healed, 2);
    }

    #[tokio::test]
    async fn failed_commit_keeps_the_medkit() {
        let character = sample_character().with_current_hp(3);
        let (id, owner) = (character.id(), character.owner_id());
        let inventory = Arc::new(InMemoryInventoryRepo::new());
        let line_id = inventory.add_line(&character, medkit(2, Some("1d8")));

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit_with_consumption()
            .times(1)
            .returning(|_, _| Err(RepoError::database("commit", "disk full")));

        let use_case = Heal::new(
            Arc::new(repo),
            inventory.clone(),
            Arc::new(FixedRandom(5)),
            Arc::new(RestRules::default()),
        );
        let err = use_case
            .execute(id, owner, &HealRequest::Medkit { inventory_item_id: line_id })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(inventory.quantity(line_id), Some(2));
    }

    #[tokio::test]
    async fn depleted_medkit_changes_nothing() {
        let character = sample_character().with_current_hp(3);
        let (id, owner) = (character.id(), character.owner_id());
        let line = medkit(0, Some("1d4"));
        let line_id = line.id;

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit().never();
        repo.expect_commit_with_consumption().never();

        let mut inventory = MockInventoryRepo::new();
        inventory
            .expect_get_line()
            .returning(move |_, _, _| Ok(Some(line.clone())));

        let err = heal(repo, inventory, Arc::new(FixedRandom(4)))
            .execute(id, owner, &HealRequest::Medkit { inventory_item_id: line_id })
            .await
            .unwrap_err();
        assert!(matches!(err, CharacterError::Depleted(ref name) if name == "Medkit"));
    }

    #[tokio::test]
    async fn full_hp_consumes_nothing() {
        let character = sample_character();
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit().never();
        repo.expect_commit_with_consumption().never();

        let mut inventory = MockInventoryRepo::new();
        inventory.expect_get_line().never();

        let result = heal(repo, inventory, Arc::new(FixedRandom(4)))
            .execute(
                id,
                owner,
                &HealRequest::Medkit {
                    inventory_item_id: InventoryLineId::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(result.healed, 0);
        assert!(!result.resource_consumed);
    }

    #[tokio::test]
    async fn non_consumable_item_is_rejected() {
        let character = sample_character().with_current_hp(3);
        let (id, owner) = (character.id(), character.owner_id());
        let sword = InventoryLine::new(
            Item::new(
                "Sword",
                ItemCategory::Weapon {
                    damage: "1d8".to_string(),
                },
            ),
            1,
        );
        let line_id = sword.id;

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit_with_consumption().never();

        let mut inventory = MockInventoryRepo::new();
        inventory
            .expect_get_line()
            .returning(move |_, _, _| Ok(Some(sword.clone())));

        let err = heal(repo, inventory, Arc::new(FixedRandom(4)))
            .execute(id, owner, &HealRequest::Medkit { inventory_item_id: line_id })
            .await
            .unwrap_err();
        assert!(matches!(err, CharacterError::WrongItemCategory(_)));
    }

    #[tokio::test]
    async fn broken_formula_still_consumes_the_medkit() {
        let character = sample_character().with_current_hp(3);
        let (id, owner) = (character.id(), character.owner_id());
        let line = medkit(2, Some("2d+"));
        let line_id = line.id;

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit_with_consumption()
            .withf(move |_, consumption: &ItemConsumption| {
                *consumption == ItemConsumption::Decrement(line_id)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut inventory = MockInventoryRepo::new();
        inventory
            .expect_get_line()
            .returning(move |_, _, _| Ok(Some(line.clone())));

        let result = heal(repo, inventory, Arc::new(FixedRandom(4)))
            .execute(id, owner, &HealRequest::Medkit { inventory_item_id: line_id })
            .await
            .unwrap();
        assert_eq!(result.healed, 0);
        assert!(result.resource_consumed);
        assert!(result.breakdown.starts_with("formula error"));
    }

    #[tokio::test]
    async fn missing_line() {
        let character = sample_character().with_current_hp(3);
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);

        let mut inventory = MockInventoryRepo::new();
        inventory.expect_get_line().returning(|_, _, _| Ok(None));

        let err = heal(repo, inventory, Arc::new(FixedRandom(4)))
            .execute(
                id,
                owner,
                &HealRequest::Medkit {
                    inventory_item_id: InventoryLineId::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CharacterError::InventoryLineNotFound(_)));
    }

    #[tokio::test]
    async fn stamina_die_defaults_to_one() {
        let character = sample_character().with_current_hp(3).with_stamina(2);
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit()
            .withf(|c: &Character| c.stamina() == 1 && c.current_hp() == 10)
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_commit_with_consumption().never();

        let result = heal(
            repo,
            MockInventoryRepo::new(),
            Arc::new(ScriptedRandom::new([4])),
        )
        .execute(id, owner, &HealRequest::ShortRestDie { dice_count: Some(0) })
        .await
        .unwrap();

        assert_eq!(result.healed, 7);
        assert_eq!(result.source, "short_rest_die");
        assert_eq!(result.breakdown, "SD1: 1d10(4) + Mod.Endurance(3) = 7");
    }

    #[tokio::test]
    async fn stamina_die_without_stamina() {
        let character = sample_character().with_current_hp(3).with_stamina(0);
        let (id, owner) = (character.id(), character.owner_id());

        let mut repo = MockCharacterRepo::new();
        expect_load(&mut repo, character);
        repo.expect_commit().never();

        let err = heal(repo, MockInventoryRepo::new(), Arc::new(FixedRandom(4)))
            .execute(id, owner, &HealRequest::ShortRestDie { dice_count: None })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CharacterError::Domain(DomainError::InsufficientStamina { .. })
        ));
    }

    #[test]
    fn consumption_follows_quantity() {
        let line = InventoryLineId::new();
        assert_eq!(
            ItemConsumption::for_quantity(line, 3),
            ItemConsumption::Decrement(line)
        );
        assert_eq!(
            ItemConsumption::for_quantity(line, 1),
            ItemConsumption::Delete(line)
        );
    }

    #[test]
    fn request_json_shape() {
        let request: HealRequest =
            serde_json::from_str(r#"{"source": "short_rest_die"}"#).unwrap();
        assert_eq!(request, HealRequest::ShortRestDie { dice_count: None });
    }
}
