//! Short and long rests.

use serde::{Deserialize, Serialize};

use super::Character;
use crate::error::DomainError;
use crate::value_objects::{
    apply_exhaustion, apply_hp, apply_stamina, restore_pu, DiceFormula, DiceRollResult, DiceTerm, Sign,
    SignedTerm, Skill,
};

/// The dice a rest rolls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRules {
    /// Rolled once per stamina die spent
    pub stamina_die: DiceFormula,
    /// Rolled once per short rest for composure
    pub composure_die: DiceFormula,
}

impl Default for RestRules {
    /// `1d10+Mod.Endurance` per stamina die, `1d4` for composure.
    fn default() -> Self {
        Self {
            stamina_die: DiceFormula::from_terms(vec![
                SignedTerm {
                    sign: Sign::Plus,
                    term: DiceTerm::Dice { count: 1, sides: 10 },
                },
                SignedTerm {
                    sign: Sign::Plus,
                    term: DiceTerm::Modifier(Skill::Endurance),
                },
            ]),
            composure_die: DiceFormula::from_terms(vec![SignedTerm {
                sign: Sign::Plus,
                term: DiceTerm::Dice { count: 1, sides: 4 },
            }]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortRestOutcome {
    pub dice_spent: u32,
    pub hp_gained: i32,
    pub pu_gained: i32,
    pub stamina_rolls: Vec<DiceRollResult>,
    pub composure_roll: DiceRollResult,
}

impl ShortRestOutcome {
    /// One audit line per roll, stamina dice first.
    pub fn breakdown(&self) -> Vec<String> {
        self.stamina_rolls
            .iter()
            .chain(std::iter::once(&self.composure_roll))
            .map(DiceRollResult::breakdown)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongRestOutcome {
    pub hp_gained: i32,
    pub pu_restored: i32,
    pub stamina: i32,
    pub exhaustion: i32,
}

impl Character {
    /// Trade stamina dice for hit points, then roll for composure.
    ///
    /// Each stamina die heals at least 0. The composure gain never lifts
    /// current PU above base PU.
    pub fn short_rest<R>(
        &mut self,
        dice: u32,
        rules: &RestRules,
        rng: &mut R,
    ) -> Result<ShortRestOutcome, DomainError>
    where
        R: FnMut(i32, i32) -> i32,
    {
        if dice == 0 {
            return Err(DomainError::validation("at least one stamina die must be spent"));
        }
        self.check_stamina(dice)?;

        let mut next = self.clone();
        next.spend_stamina_dice(dice)?;

        let context = next.modifier_context();
        let stamina_rolls = (0..dice)
            .map(|_| rules.stamina_die.roll(&context, &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;
        let healing = stamina_rolls
            .iter()
            .fold(0i32, |acc, roll| acc.saturating_add(roll.total.max(0)));

        let hp_before = next.current_hp;
        next.current_hp = apply_hp(next.current_hp, next.max_hp, healing);

        let composure_roll = rules.composure_die.roll(&context, &mut *rng)?;
        let pu_before = next.current_pu;
        next.current_pu = restore_pu(next.current_pu, next.base_pu, composure_roll.total);

        let outcome = ShortRestOutcome {
            dice_spent: dice,
            hp_gained: next.current_hp - hp_before,
            pu_gained: next.current_pu - pu_before,
            stamina_rolls,
            composure_roll,
        };
        *self = next;
        Ok(outcome)
    }

    /// Full recovery: HP to max, stamina to `max(1, level)`, one exhaustion
    /// level removed, PU to base.
    pub fn long_rest(&mut self) -> LongRestOutcome {
        let hp_before = self.current_hp;
        let pu_before = self.current_pu;

        self.current_hp = self.max_hp;
        self.stamina = i32::from(self.level).max(1);
        self.exhaustion = apply_exhaustion(self.exhaustion, -1);
        self.current_pu = self.base_pu;

        LongRestOutcome {
            hp_gained: self.current_hp - hp_before,
            pu_restored: self.current_pu - pu_before,
            stamina: self.stamina,
            exhaustion: self.exhaustion,
        }
    }

    pub(crate) fn check_stamina(&self, dice: u32) -> Result<(), DomainError> {
        let enough = u32::try_from(self.stamina).map_or(false, |available| available >= dice);
        if enough {
            Ok(())
        } else {
            Err(DomainError::InsufficientStamina {
                required: dice,
                available: self.stamina,
            })
        }
    }

    pub(crate) fn spend_stamina_dice(&mut self, dice: u32) -> Result<(), DomainError> {
        self.check_stamina(dice)?;
        // dice <= stamina, so it fits in an i32
        let spent = i32::try_from(dice).unwrap_or(i32::MAX);
        self.stamina = apply_stamina(self.stamina, -spent);
        Ok(())
    }
}
