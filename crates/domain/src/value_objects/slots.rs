//! Active-ability slots and equipment references.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{AbilityId, InventoryLineId};

pub const ABILITY_SLOT_COUNT: usize = 5;

/// One active-ability slot with its own cooldown counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: Option<AbilityId>,
    pub cooldown: u32,
}

/// The five ordered slots, indexed `0..5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlots {
    slots: [AbilitySlot; ABILITY_SLOT_COUNT],
}

impl AbilitySlots {
    pub fn get(&self, index: usize) -> Result<&AbilitySlot, DomainError> {
        self.slots.get(index).ok_or(DomainError::InvalidSlot(index))
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut AbilitySlot, DomainError> {
        self.slots
            .get_mut(index)
            .ok_or(DomainError::InvalidSlot(index))
    }

    /// Put an ability in a slot. The slot's cooldown is reset.
    pub fn assign(&mut self, index: usize, ability: AbilityId) -> Result<(), DomainError> {
        *self.get_mut(index)? = AbilitySlot {
            ability: Some(ability),
            cooldown: 0,
        };
        Ok(())
    }

    /// Empty a slot. Returns the ability that was in it.
    pub fn clear(&mut self, index: usize) -> Result<Option<AbilityId>, DomainError> {
        let slot = self.get_mut(index)?;
        slot.cooldown = 0;
        Ok(slot.ability.take())
    }

    pub fn set_cooldown(&mut self, index: usize, turns: u32) -> Result<(), DomainError> {
        self.get_mut(index)?.cooldown = turns;
        Ok(())
    }

    /// Count every cooldown down by one, stopping at zero.
    pub fn tick(&mut self) {
        for slot in &mut self.slots {
            slot.cooldown = slot.cooldown.saturating_sub(1);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilitySlot> {
        self.slots.iter()
    }
}

/// Inventory lines referenced by the four equipment slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSlots {
    pub armor: Option<InventoryLineId>,
    pub shield: Option<InventoryLineId>,
    pub weapon1: Option<InventoryLineId>,
    pub weapon2: Option<InventoryLineId>,
}

impl EquipmentSlots {
    /// Drop every reference to `line`. Returns how many slots pointed at it.
    pub fn clear_references_to(&mut self, line: InventoryLineId) -> usize {
        let mut cleared = 0;
        for slot in [
            &mut self.armor,
            &mut self.shield,
            &mut self.weapon1,
            &mut self.weapon2,
        ] {
            if *slot == Some(line) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }
}

/// Per-turn action flags. Reset by the turn-management collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnActions {
    pub main_used: bool,
    pub bonus_used: bool,
    pub reaction_used: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_and_clear_slot() {
        let mut slots = AbilitySlots::default();
        let ability = AbilityId::new();
        slots.assign(2, ability).unwrap();
        slots.set_cooldown(2, 3).unwrap();
        assert_eq!(slots.get(2).unwrap().ability, Some(ability));
        assert_eq!(slots.clear(2).unwrap(), Some(ability));
        assert_eq!(*slots.get(2).unwrap(), AbilitySlot::default());
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut slots = AbilitySlots::default();
        assert_eq!(
            slots.assign(5, AbilityId::new()),
            Err(DomainError::InvalidSlot(5))
        );
        assert!(slots.get(7).is_err());
    }

    #[test]
    fn tick_counts_down_independently() {
        let mut slots = AbilitySlots::default();
        slots.set_cooldown(0, 2).unwrap();
        slots.set_cooldown(4, 1).unwrap();
        slots.tick();
        slots.tick();
        let cooldowns: Vec<u32> = slots.iter().map(|s| s.cooldown).collect();
        assert_eq!(cooldowns, vec![0, 0, 0, 0, 0]);
        slots.set_cooldown(1, 3).unwrap();
        slots.tick();
        assert_eq!(slots.get(1).unwrap().cooldown, 2);
    }

    #[test]
    fn clears_every_matching_equipment_reference() {
        let line = InventoryLineId::new();
        let other = InventoryLineId::new();
        let mut equipment = EquipmentSlots {
            armor: Some(other),
            shield: None,
            weapon1: Some(line),
            weapon2: Some(line),
        };
        assert_eq!(equipment.clear_references_to(line), 2);
        assert_eq!(equipment.armor, Some(other));
        assert_eq!(equipment.weapon1, None);
        assert_eq!(equipment.weapon2, None);
    }
}
