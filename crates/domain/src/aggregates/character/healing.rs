//! Healing arithmetic.
//!
//! Item lookup and consumption belong to the inventory; this module only
//! turns a formula or spent stamina dice into hit points.

use serde::{Deserialize, Serialize};

use super::rest::RestRules;
use super::Character;
use crate::error::DomainError;
use crate::value_objects::{apply_hp, DiceFormula, DiceRollResult, FormulaError};

/// Healing rolled and actually received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealOutcome {
    /// Raw result of the roll, may be negative
    pub rolled: i32,
    /// HP actually gained after the `0..=max_hp` clamp
    pub healed: i32,
    pub breakdown: String,
    /// Set when an item formula could not be parsed or rolled
    #[serde(skip)]
    pub formula_error: Option<FormulaError>,
}

impl Character {
    /// Heal from an item's effect formula.
    ///
    /// Never fails: a missing formula heals 0 and a broken one heals 0 with
    /// the error text in the breakdown.
    pub fn heal_with_formula<R>(&mut self, formula: Option<&str>, rng: &mut R) -> HealOutcome
    where
        R: FnMut(i32, i32) -> i32,
    {
        let Some(text) = formula.filter(|f| !f.trim().is_empty()) else {
            return self.receive_healing(0, "no formula".to_string(), None);
        };

        let context = self.modifier_context();
        match DiceFormula::parse(text).and_then(|parsed| parsed.roll(&context, rng)) {
            Ok(roll) => self.receive_healing(roll.total, roll.breakdown(), None),
            Err(err) => {
                let breakdown = format!("formula error in '{text}': {err}");
                self.receive_healing(0, breakdown, Some(err))
            }
        }
    }

    /// Spend stamina dice and heal by one stamina-die roll per die.
    ///
    /// Rolls are summed as they come; only the total is floored at 0.
    pub fn heal_with_stamina_dice<R>(
        &mut self,
        dice: u32,
        rules: &RestRules,
        rng: &mut R,
    ) -> Result<HealOutcome, DomainError>
    where
        R: FnMut(i32, i32) -> i32,
    {
        self.check_stamina(dice)?;

        let context = self.modifier_context();
        let rolls = (0..dice)
            .map(|_| rules.stamina_die.roll(&context, &mut *rng))
            .collect::<Result<Vec<DiceRollResult>, _>>()?;
        let total = rolls
            .iter()
            .fold(0i32, |acc, roll| acc.saturating_add(roll.total));
        let breakdown = rolls
            .iter()
            .enumerate()
            .map(|(index, roll)| format!("SD{}: {}", index + 1, roll.breakdown()))
            .collect::<Vec<_>>()
            .join(" | ");

        self.spend_stamina_dice(dice)?;
        Ok(self.receive_healing(total, breakdown, None))
    }

    fn receive_healing(
        &mut self,
        rolled: i32,
        breakdown: String,
        formula_error: Option<FormulaError>,
    ) -> HealOutcome {
        let before = self.current_hp;
        self.current_hp = apply_hp(self.current_hp, self.max_hp, rolled.max(0));
        HealOutcome {
            rolled,
            healed: self.current_hp - before,
            breakdown,
            formula_error,
        }
    }
}
