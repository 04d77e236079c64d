//! Aggregate roots - domain objects that own their related data
//!
//! The character is the only aggregate: every rule reads one character
//! snapshot, mutates it through its methods and hands it back for commit.

pub mod character;

pub use character::healing::HealOutcome;
pub use character::progression::{
    xp_for_level, LevelUpRequest, LevelUpSummary, MAX_LEVEL, SKILL_POINTS_PER_LEVEL,
};
pub use character::rest::{LongRestOutcome, RestRules, ShortRestOutcome};
pub use character::stats::{StatUpdate, StatUpdateOutcome};
pub use character::{
    Character, CharacterNotes, NotesUpdate, BASE_MAX_HP, INITIAL_BRANCH_POINTS, STARTING_SPEED,
};
