//! Derived statistics.
//!
//! Pure functions of the raw skill scores and the worn equipment. Nothing
//! here is stored on the character, so a skill change can never leave a
//! stale armor class or initiative behind.

use crate::entities::ItemCategory;
use crate::value_objects::{Skill, SkillScores};

const BASE_AC: i32 = 10;
const PASSIVE_BASE: i32 = 10;

pub fn initiative_bonus(skills: &SkillScores) -> i32 {
    skills.modifier(Skill::Reaction)
}

/// `10 + dexterity modifier`
pub fn base_armor_class(skills: &SkillScores) -> i32 {
    BASE_AC + skills.modifier(Skill::Dexterity)
}

/// Armor class with worn armor and shield.
///
/// Armor caps the dexterity part at its `max_dex_bonus`. Items of the wrong
/// category in a slot contribute nothing.
pub fn total_armor_class(
    skills: &SkillScores,
    armor: Option<&ItemCategory>,
    shield: Option<&ItemCategory>,
) -> i32 {
    let mut dex = skills.modifier(Skill::Dexterity);
    let mut bonus = 0;

    if let Some(ItemCategory::Armor {
        ac_bonus,
        max_dex_bonus,
    }) = armor
    {
        if let Some(cap) = max_dex_bonus {
            dex = dex.min(*cap);
        }
        bonus += ac_bonus;
    }
    if let Some(ItemCategory::Shield { ac_bonus }) = shield {
        bonus += ac_bonus;
    }

    BASE_AC + dex + bonus
}

/// `10 + attention modifier`
pub fn passive_attention(skills: &SkillScores) -> i32 {
    PASSIVE_BASE + skills.modifier(Skill::Attention)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agile() -> SkillScores {
        SkillScores::from_pairs([(Skill::Dexterity, 8), (Skill::Reaction, 10), (Skill::Attention, 3)])
            .unwrap()
    }

    #[test]
    fn unarmored_values() {
        let skills = agile();
        assert_eq!(initiative_bonus(&skills), 5);
        assert_eq!(base_armor_class(&skills), 14);
        assert_eq!(total_armor_class(&skills, None, None), 14);
        assert_eq!(passive_attention(&skills), 11);
    }

    #[test]
    fn heavy_armor_caps_dexterity() {
        let skills = agile();
        let plate = ItemCategory::Armor {
            ac_bonus: 6,
            max_dex_bonus: Some(1),
        };
        let shield = ItemCategory::Shield { ac_bonus: 2 };
        assert_eq!(total_armor_class(&skills, Some(&plate), Some(&shield)), 10 + 1 + 6 + 2);
    }

    #[test]
    fn light_armor_keeps_full_dexterity() {
        let skills = agile();
        let leather = ItemCategory::Armor {
            ac_bonus: 1,
            max_dex_bonus: None,
        };
        assert_eq!(total_armor_class(&skills, Some(&leather), None), 15);
    }

    #[test]
    fn wrong_category_in_slot_is_ignored() {
        let skills = agile();
        let rope = ItemCategory::General {
            effect_formula: None,
        };
        assert_eq!(total_armor_class(&skills, Some(&rope), Some(&rope)), 14);
    }
}
