//! Character-sheet rules: skills, dice formulas, resource pools, emotion
//! triggers, leveling, rests and healing.
//!
//! Everything here is pure. Randomness is passed in as a closure
//! `FnMut(min, max) -> i32` returning a uniform draw in `min..=max`.

pub mod aggregates;
pub mod derived;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    xp_for_level, Character, CharacterNotes, HealOutcome, LevelUpRequest, LevelUpSummary,
    LongRestOutcome, NotesUpdate, RestRules, ShortRestOutcome, StatUpdate, StatUpdateOutcome,
    BASE_MAX_HP, INITIAL_BRANCH_POINTS, MAX_LEVEL, SKILL_POINTS_PER_LEVEL, STARTING_SPEED,
};
pub use entities::{InventoryLine, Item, ItemCategory, StatusEffect};
pub use error::{DomainError, ErrorKind};
pub use ids::{AbilityId, CharacterId, InventoryLineId, ItemId, StatusEffectId, UserId};
pub use value_objects::{
    apply_exhaustion, apply_hp, apply_pu, apply_stamina, base_pu_for, emotion_for_roll,
    restore_pu, roll_formula, skill_modifier, AbilitySlot, AbilitySlots, ActiveEffects, Branch,
    BranchLevels, CheckResult, DiceFormula, DiceRollResult, DiceTerm, EmotionKind,
    EquipmentSlots, FormulaError, ModifierContext, PartDetail, PuOutcome, RollPart, Sign,
    SignedTerm, Skill, SkillScores, TriggerState, TurnActions, ABILITY_SLOT_COUNT, BASE_PU_CAP,
    EMOTION_DIE, MAX_BRANCH_LEVEL, MAX_DICE_PER_TERM, MAX_DIE_SIZE, MAX_EXHAUSTION, MAX_SKILL,
    MIN_SKILL, NEGATIVE_EMOTIONS, POSITIVE_EMOTIONS, PU_TARGET_CAP,
};
