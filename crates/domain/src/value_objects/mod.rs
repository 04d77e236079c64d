//! Value objects - Immutable objects defined by their attributes

mod branch;
mod dice;
mod emotion;
mod resources;
mod skill;
mod slots;

pub use branch::{Branch, BranchLevels, MAX_BRANCH_LEVEL};
pub use dice::{
    roll_formula, DiceFormula, DiceRollResult, DiceTerm, FormulaError, ModifierContext,
    PartDetail, RollPart, Sign, SignedTerm, MAX_DICE_PER_TERM, MAX_DIE_SIZE,
};
pub use emotion::{
    emotion_for_roll, ActiveEffects, TriggerState, EMOTION_DIE, NEGATIVE_EMOTIONS,
    POSITIVE_EMOTIONS,
};
pub use resources::{
    apply_exhaustion, apply_hp, apply_pu, apply_stamina, base_pu_for, restore_pu, CheckResult,
    EmotionKind, PuOutcome, BASE_PU_CAP, MAX_EXHAUSTION, PU_TARGET_CAP,
};
pub use skill::{skill_modifier, Skill, SkillScores, MAX_SKILL, MIN_SKILL};
pub use slots::{AbilitySlot, AbilitySlots, EquipmentSlots, TurnActions, ABILITY_SLOT_COUNT};
