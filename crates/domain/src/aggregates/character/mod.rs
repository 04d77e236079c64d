//! Character aggregate - the sheet every rule operates on
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: pools are only written through the clamp functions in
//!   [`crate::value_objects`], so the bounds hold after every mutation
//! - **Derived values are computed**: modifiers, armor class and initiative
//!   are functions of the raw scores, never fields
//! - **All-or-nothing**: fallible multi-step operations (level up, short rest)
//!   work on a clone and replace `self` only on success
//!
//! The rule families live in child modules so they can reach the private
//! fields: [`progression`], [`rest`], [`healing`] and [`stats`].

pub mod healing;
pub mod progression;
pub mod rest;
pub mod stats;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::derived;
use crate::entities::{InventoryLine, StatusEffect};
use crate::error::DomainError;
use crate::ids::{AbilityId, CharacterId, InventoryLineId, StatusEffectId, UserId};
use crate::value_objects::{
    base_pu_for, AbilitySlots, ActiveEffects, Branch, BranchLevels, EquipmentSlots,
    ModifierContext, Skill, SkillScores, TriggerState, TurnActions, MAX_EXHAUSTION, PU_TARGET_CAP,
};

/// Max HP of a new character before the endurance modifier.
pub const BASE_MAX_HP: i32 = 10;
/// Branch points distributed at creation.
pub const INITIAL_BRANCH_POINTS: u32 = 3;
pub const STARTING_SPEED: i32 = 10;
const MAX_NAME_LEN: usize = 200;

/// Free-text background fields. Never read by the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterNotes {
    pub appearance: Option<String>,
    pub character: Option<String>,
    pub motivation: Option<String>,
    pub background: Option<String>,
}

/// Partial update of [`CharacterNotes`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesUpdate {
    pub appearance: Option<String>,
    pub character: Option<String>,
    pub motivation: Option<String>,
    pub background: Option<String>,
}

/// A player character sheet.
///
/// # Invariants
///
/// - `0 <= current_hp <= max_hp`
/// - `0 <= current_pu <= 10`; rests pull it back to `base_pu`
/// - `stamina >= 0`, `0 <= exhaustion <= 6`
/// - every skill in `1..=10`, every branch in `0..=10`
/// - each status effect id appears at most once
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use charsheet_domain::{Character, Skill, SkillScores, UserId};
///
/// let skills = SkillScores::from_pairs([(Skill::Endurance, 4), (Skill::SelfControl, 6)]).unwrap();
/// let branches = BTreeMap::from([("medic".to_string(), 2), ("scout".to_string(), 1)]);
/// let hero = Character::create(UserId::new(), "Vera", skills, &branches).unwrap();
///
/// assert_eq!(hero.level(), 1);
/// assert_eq!(hero.max_hp(), 12);
/// assert_eq!(hero.base_pu(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    // Identity
    id: CharacterId,
    owner_id: UserId,
    name: String,

    // Progression
    level: u8,
    experience: u32,
    skills: SkillScores,
    branches: BranchLevels,

    // Resource pools
    max_hp: i32,
    current_hp: i32,
    base_pu: i32,
    current_pu: i32,
    stamina: i32,
    exhaustion: i32,
    speed: i32,

    // Slots and flags
    equipment: EquipmentSlots,
    ability_slots: AbilitySlots,
    turn_actions: TurnActions,
    active_effects: ActiveEffects,

    notes: CharacterNotes,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a level 1 character.
    ///
    /// `initial_branches` maps branch keys to starting levels; the levels must
    /// add up to exactly [`INITIAL_BRANCH_POINTS`].
    pub fn create(
        owner_id: UserId,
        name: impl Into<String>,
        skills: SkillScores,
        initial_branches: &BTreeMap<String, u8>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("character name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "character name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }

        let mut branches = BranchLevels::default();
        for (key, points) in initial_branches {
            let branch: Branch = key.parse()?;
            branches.raise(branch, *points)?;
        }
        let spent = branches.total();
        if spent != INITIAL_BRANCH_POINTS {
            return Err(DomainError::PointBudgetMismatch {
                expected: INITIAL_BRANCH_POINTS,
                spent,
            });
        }

        let max_hp = BASE_MAX_HP + skills.modifier(Skill::Endurance);
        let base_pu = base_pu_for(skills.modifier(Skill::SelfControl));

        Ok(Self {
            id: CharacterId::new(),
            owner_id,
            name,
            level: 1,
            experience: 0,
            skills,
            branches,
            max_hp,
            current_hp: max_hp,
            base_pu,
            current_pu: base_pu,
            stamina: 1,
            exhaustion: 0,
            speed: STARTING_SPEED,
            equipment: EquipmentSlots::default(),
            ability_slots: AbilitySlots::default(),
            turn_actions: TurnActions::default(),
            active_effects: ActiveEffects::default(),
            notes: CharacterNotes::default(),
        })
    }

    // =========================================================================
    // Identity Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if `user` owns this character.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    // =========================================================================
    // Progression Accessors
    // =========================================================================

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn experience(&self) -> u32 {
        self.experience
    }

    #[inline]
    pub fn skills(&self) -> &SkillScores {
        &self.skills
    }

    #[inline]
    pub fn branches(&self) -> &BranchLevels {
        &self.branches
    }

    /// Current modifier of a skill, recomputed from the raw score.
    pub fn modifier(&self, skill: Skill) -> i32 {
        self.skills.modifier(skill)
    }

    /// Every skill modifier, for formula evaluation.
    pub fn modifier_context(&self) -> ModifierContext {
        ModifierContext::from_scores(&self.skills)
    }

    // =========================================================================
    // Resource Accessors
    // =========================================================================

    #[inline]
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    #[inline]
    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    #[inline]
    pub fn base_pu(&self) -> i32 {
        self.base_pu
    }

    #[inline]
    pub fn current_pu(&self) -> i32 {
        self.current_pu
    }

    #[inline]
    pub fn stamina(&self) -> i32 {
        self.stamina
    }

    #[inline]
    pub fn exhaustion(&self) -> i32 {
        self.exhaustion
    }

    #[inline]
    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn is_at_full_hp(&self) -> bool {
        self.current_hp >= self.max_hp
    }

    // =========================================================================
    // Derived Statistics
    // =========================================================================

    pub fn initiative_bonus(&self) -> i32 {
        derived::initiative_bonus(&self.skills)
    }

    pub fn base_armor_class(&self) -> i32 {
        derived::base_armor_class(&self.skills)
    }

    /// Armor class with worn armor and shield.
    ///
    /// The caller resolves the equipment references to inventory lines.
    pub fn total_armor_class(
        &self,
        armor: Option<&InventoryLine>,
        shield: Option<&InventoryLine>,
    ) -> i32 {
        derived::total_armor_class(
            &self.skills,
            armor.map(|line| &line.item.category),
            shield.map(|line| &line.item.category),
        )
    }

    pub fn passive_attention(&self) -> i32 {
        derived::passive_attention(&self.skills)
    }

    /// Experience still required for the next level, `None` at the cap.
    pub fn experience_to_next_level(&self) -> Option<u32> {
        progression::xp_for_level(self.level.saturating_add(1))
            .map(|threshold| threshold.saturating_sub(self.experience))
    }

    // =========================================================================
    // Slots, Effects and Notes
    // =========================================================================

    #[inline]
    pub fn equipment(&self) -> &EquipmentSlots {
        &self.equipment
    }

    #[inline]
    pub fn ability_slots(&self) -> &AbilitySlots {
        &self.ability_slots
    }

    #[inline]
    pub fn turn_actions(&self) -> &TurnActions {
        &self.turn_actions
    }

    #[inline]
    pub fn active_effects(&self) -> &ActiveEffects {
        &self.active_effects
    }

    #[inline]
    pub fn notes(&self) -> &CharacterNotes {
        &self.notes
    }

    // =========================================================================
    // Builder Methods (used when loading from storage)
    // =========================================================================

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self
    }

    /// Set current HP, clamped to `0..=max_hp`.
    pub fn with_current_hp(mut self, hp: i32) -> Self {
        self.current_hp = hp.clamp(0, self.max_hp.max(0));
        self
    }

    /// Set current PU, clamped like a composure target.
    pub fn with_current_pu(mut self, pu: i32) -> Self {
        self.current_pu = pu.clamp(0, PU_TARGET_CAP);
        self
    }

    pub fn with_stamina(mut self, stamina: i32) -> Self {
        self.stamina = stamina.max(0);
        self
    }

    pub fn with_exhaustion(mut self, exhaustion: i32) -> Self {
        self.exhaustion = exhaustion.clamp(0, MAX_EXHAUSTION);
        self
    }

    pub fn with_equipment(mut self, equipment: EquipmentSlots) -> Self {
        self.equipment = equipment;
        self
    }

    // =========================================================================
    // Mutation Methods
    // =========================================================================

    /// Add an effect by id. Returns `false` if it was already active.
    pub fn add_status_effect(&mut self, effect: StatusEffectId) -> bool {
        self.active_effects.insert(effect)
    }

    /// Remove an effect by id. Returns `false` if it was not active.
    pub fn remove_status_effect(&mut self, effect: StatusEffectId) -> bool {
        self.active_effects.remove(effect)
    }

    /// Finish an emotion trigger against this character's active effects.
    pub fn resolve_trigger(
        &mut self,
        state: TriggerState,
        found: Option<&StatusEffect>,
    ) -> Result<TriggerState, DomainError> {
        state.resolve(found, &mut self.active_effects)
    }

    pub fn assign_ability(&mut self, slot: usize, ability: AbilityId) -> Result<(), DomainError> {
        self.ability_slots.assign(slot, ability)
    }

    pub fn clear_ability_slot(&mut self, slot: usize) -> Result<Option<AbilityId>, DomainError> {
        self.ability_slots.clear(slot)
    }

    pub fn set_ability_cooldown(&mut self, slot: usize, turns: u32) -> Result<(), DomainError> {
        self.ability_slots.set_cooldown(slot, turns)
    }

    /// Count every slot cooldown down by one.
    pub fn tick_cooldowns(&mut self) {
        self.ability_slots.tick();
    }

    /// Drop equipment references to an inventory line that no longer exists.
    pub fn clear_equipment_references(&mut self, line: InventoryLineId) -> usize {
        self.equipment.clear_references_to(line)
    }

    /// Overwrite the supplied fields. Returns `false` if none was supplied.
    pub fn update_notes(&mut self, update: NotesUpdate) -> bool {
        let notes = &mut self.notes;
        let mut updated = false;
        for (field, value) in [
            (&mut notes.appearance, update.appearance),
            (&mut notes.character, update.character),
            (&mut notes.motivation, update.motivation),
            (&mut notes.background, update.background),
        ] {
            if value.is_some() {
                *field = value;
                updated = true;
            }
        }
        updated
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::value_objects::{EmotionKind, MAX_BRANCH_LEVEL};

    /// Endurance 6 (+3), self-control 6 (+3), reaction 4 (+2), dexterity 5 (+2).
    pub(crate) fn sample_character() -> Character {
        let skills = SkillScores::from_pairs([
            (Skill::Endurance, 6),
            (Skill::SelfControl, 6),
            (Skill::Reaction, 4),
            (Skill::Dexterity, 5),
            (Skill::Attention, 8),
        ])
        .unwrap();
        let branches = BTreeMap::from([("medic".to_string(), 2), ("fighter".to_string(), 1)]);
        Character::create(UserId::new(), "Mira", skills, &branches).unwrap()
    }

    #[test]
    fn create_sets_level_one_defaults() {
        let hero = sample_character();
        assert_eq!(hero.level(), 1);
        assert_eq!(hero.experience(), 0);
        assert_eq!(hero.max_hp(), 13);
        assert_eq!(hero.current_hp(), 13);
        assert_eq!(hero.base_pu(), 3);
        assert_eq!(hero.current_pu(), 3);
        assert_eq!(hero.stamina(), 1);
        assert_eq!(hero.exhaustion(), 0);
        assert_eq!(hero.speed(), STARTING_SPEED);
        assert_eq!(hero.branches().get(Branch::Medic), 2);
        assert_eq!(hero.branches().total(), 3);
        assert!(hero.active_effects().is_empty());
    }

    #[test]
    fn create_requires_three_branch_points() {
        let branches = BTreeMap::from([("medic".to_string(), 2)]);
        let err = Character::create(UserId::new(), "Mira", SkillScores::baseline(), &branches)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::PointBudgetMismatch {
                expected: 3,
                spent: 2
            }
        );
    }

    #[test]
    fn create_rejects_unknown_branch_and_blank_name() {
        let branches = BTreeMap::from([("pilot".to_string(), 3)]);
        assert_eq!(
            Character::create(UserId::new(), "Mira", SkillScores::baseline(), &branches),
            Err(DomainError::InvalidBranch("pilot".to_string()))
        );

        let branches = BTreeMap::from([("scout".to_string(), 3)]);
        assert!(matches!(
            Character::create(UserId::new(), "   ", SkillScores::baseline(), &branches),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_branch_over_cap() {
        let branches = BTreeMap::from([("scout".to_string(), MAX_BRANCH_LEVEL + 1)]);
        assert_eq!(
            Character::create(UserId::new(), "Mira", SkillScores::baseline(), &branches),
            Err(DomainError::BranchMaxed(Branch::Scout))
        );
    }

    #[test]
    fn derived_values_follow_skills() {
        let hero = sample_character();
        assert_eq!(hero.initiative_bonus(), 2);
        assert_eq!(hero.base_armor_class(), 12);
        assert_eq!(hero.passive_attention(), 14);
        assert_eq!(hero.experience_to_next_level(), Some(300));
        assert_eq!(hero.with_experience(120).experience_to_next_level(), Some(180));
    }

    #[test]
    fn builders_clamp_pools() {
        let hero = sample_character()
            .with_current_hp(99)
            .with_current_pu(-4)
            .with_stamina(-1)
            .with_exhaustion(9);
        assert_eq!(hero.current_hp(), hero.max_hp());
        assert_eq!(hero.current_pu(), 0);
        assert_eq!(hero.stamina(), 0);
        assert_eq!(hero.exhaustion(), 6);
    }

    #[test]
    fn status_effects_have_set_semantics() {
        let mut hero = sample_character();
        let fear = StatusEffectId::new();
        assert!(hero.add_status_effect(fear));
        assert!(!hero.add_status_effect(fear));
        assert_eq!(hero.active_effects().len(), 1);
        assert!(hero.remove_status_effect(fear));
        assert!(!hero.remove_status_effect(fear));
    }

    #[test]
    fn resolve_trigger_writes_into_active_effects() {
        let mut hero = sample_character();
        let panic = StatusEffect::new("Panic", "Hands shake");
        let state = TriggerState::Pending(EmotionKind::Negative).draw(4).unwrap();
        let resolved = hero.resolve_trigger(state, Some(&panic)).unwrap();
        assert_eq!(resolved.into_applied(), Some("Panic".to_string()));
        assert!(hero.active_effects().contains(panic.id));
    }

    #[test]
    fn notes_update_keeps_missing_fields() {
        let mut hero = sample_character();
        hero.update_notes(NotesUpdate {
            appearance: Some("Scar over the left eye".to_string()),
            motivation: Some("Find her brother".to_string()),
            ..Default::default()
        });
        hero.update_notes(NotesUpdate {
            motivation: Some("Revenge".to_string()),
            ..Default::default()
        });
        assert_eq!(
            hero.notes().appearance.as_deref(),
            Some("Scar over the left eye")
        );
        assert_eq!(hero.notes().motivation.as_deref(), Some("Revenge"));
        assert_eq!(hero.notes().background, None);
        assert!(!hero.update_notes(NotesUpdate::default()));
    }

    #[test]
    fn serde_round_trip_keeps_state() {
        let mut hero = sample_character().with_experience(950);
        hero.add_status_effect(StatusEffectId::new());
        hero.assign_ability(1, AbilityId::new()).unwrap();
        let json = serde_json::to_string(&hero).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hero);
    }
}
