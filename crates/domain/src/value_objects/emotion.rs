//! Emotion trigger state machine and the active status-effect set.
//!
//! An extreme composure swing (see [`super::apply_pu`]) arms the machine.
//! Resolution draws a d6, picks a name from the six-entry table for the
//! trigger kind, and applies the matching catalog effect unless the
//! character already has it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::resources::{EmotionKind, PuOutcome};
use crate::entities::StatusEffect;
use crate::error::DomainError;
use crate::ids::StatusEffectId;

/// Faces on the emotion die.
pub const EMOTION_DIE: i32 = 6;

/// Indexed by `roll - 1`.
pub const NEGATIVE_EMOTIONS: [&str; 6] = [
    "Fear",
    "Anger",
    "Despair",
    "Panic",
    "Apathy",
    "Shame",
];

/// Indexed by `roll - 1`.
pub const POSITIVE_EMOTIONS: [&str; 6] = [
    "Inspiration",
    "Determination",
    "Euphoria",
    "Serenity",
    "Confidence",
    "Hope",
];

/// Emotion name for a d6 result, or `None` if the roll is off the table.
pub fn emotion_for_roll(kind: EmotionKind, roll: i32) -> Option<&'static str> {
    let table = match kind {
        EmotionKind::Negative => &NEGATIVE_EMOTIONS,
        EmotionKind::Positive => &POSITIVE_EMOTIONS,
    };
    let index = usize::try_from(roll.checked_sub(1)?).ok()?;
    table.get(index).copied()
}

/// Status effects currently on a character, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    ids: BTreeSet<StatusEffectId>,
}

impl ActiveEffects {
    /// Returns `true` if the effect was not already present.
    pub fn insert(&mut self, id: StatusEffectId) -> bool {
        self.ids.insert(id)
    }

    /// Returns `false` when the effect was not present.
    pub fn remove(&mut self, id: StatusEffectId) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: StatusEffectId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusEffectId> + '_ {
        self.ids.iter().copied()
    }
}

/// States of one trigger evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    /// Armed by a PU extreme, waiting for the d6.
    Pending(EmotionKind),
    /// The d6 was drawn; the selected name waits for a catalog lookup.
    Selected {
        kind: EmotionKind,
        roll: i32,
        name: Option<&'static str>,
    },
    /// Name of the newly applied effect, or `None` if nothing was applied.
    Resolved(Option<String>),
}

impl TriggerState {
    /// Idle → Pending when the PU change emitted a trigger.
    pub fn arm(outcome: &PuOutcome) -> Self {
        match outcome.trigger {
            Some(kind) => Self::Pending(kind),
            None => Self::Idle,
        }
    }

    /// Pending → Selected with a d6 result in `1..=6`.
    pub fn draw(self, roll: i32) -> Result<Self, DomainError> {
        match self {
            Self::Pending(kind) => Ok(Self::Selected {
                kind,
                roll,
                name: emotion_for_roll(kind, roll),
            }),
            other => Err(DomainError::invalid_state_transition(format!(
                "cannot draw an emotion from {other:?}"
            ))),
        }
    }

    /// The name to look up in the effect catalog, if one was selected.
    pub fn selected_name(&self) -> Option<&'static str> {
        match self {
            Self::Selected { name, .. } => *name,
            _ => None,
        }
    }

    /// Selected → Resolved.
    ///
    /// `found` is the catalog record matching the selected name by exact
    /// name. The effect is added only if it is not already active.
    pub fn resolve(
        self,
        found: Option<&StatusEffect>,
        active: &mut ActiveEffects,
    ) -> Result<Self, DomainError> {
        let name = match self {
            Self::Selected { name, .. } => name,
            other => {
                return Err(DomainError::invalid_state_transition(format!(
                    "cannot resolve an emotion from {other:?}"
                )))
            }
        };

        let applied = match (name, found) {
            (Some(name), Some(effect)) if effect.name == name => {
                active.insert(effect.id).then(|| effect.name.clone())
            }
            _ => None,
        };
        Ok(Self::Resolved(applied))
    }

    /// The applied effect name once resolved.
    pub fn into_applied(self) -> Option<String> {
        match self {
            Self::Resolved(name) => name,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::resources::{apply_pu, CheckResult};

    fn effect(name: &str) -> StatusEffect {
        StatusEffect::new(name, format!("{name} takes hold"))
    }

    #[test]
    fn tables_are_indexed_from_one() {
        assert_eq!(emotion_for_roll(EmotionKind::Negative, 1), Some("Fear"));
        assert_eq!(emotion_for_roll(EmotionKind::Positive, 6), Some("Hope"));
        assert_eq!(emotion_for_roll(EmotionKind::Positive, 0), None);
        assert_eq!(emotion_for_roll(EmotionKind::Negative, 7), None);
    }

    #[test]
    fn no_trigger_stays_idle() {
        let outcome = apply_pu(3, 5, 4, None);
        assert_eq!(TriggerState::arm(&outcome), TriggerState::Idle);
        assert!(TriggerState::Idle.draw(3).is_err());
    }

    #[test]
    fn full_cycle_applies_effect_once() {
        let outcome = apply_pu(1, 5, 0, Some(CheckResult::Failure));
        let anger = effect("Anger");
        let mut active = ActiveEffects::default();

        let selected = TriggerState::arm(&outcome).draw(2).unwrap();
        assert_eq!(selected.selected_name(), Some("Anger"));
        let resolved = selected.resolve(Some(&anger), &mut active).unwrap();
        assert_eq!(resolved, TriggerState::Resolved(Some("Anger".to_string())));
        assert!(active.contains(anger.id));

        let again = TriggerState::Pending(EmotionKind::Negative)
            .draw(2)
            .unwrap()
            .resolve(Some(&anger), &mut active)
            .unwrap();
        assert_eq!(again.into_applied(), None);
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn missing_catalog_entry_resolves_to_none() {
        let mut active = ActiveEffects::default();
        let resolved = TriggerState::Pending(EmotionKind::Positive)
            .draw(1)
            .unwrap()
            .resolve(None, &mut active)
            .unwrap();
        assert_eq!(resolved, TriggerState::Resolved(None));
        assert!(active.is_empty());
    }

    #[test]
    fn mismatched_record_is_not_applied() {
        let mut active = ActiveEffects::default();
        let wrong = effect("Panic");
        let resolved = TriggerState::Pending(EmotionKind::Negative)
            .draw(1)
            .unwrap()
            .resolve(Some(&wrong), &mut active)
            .unwrap();
        assert_eq!(resolved.into_applied(), None);
        assert!(active.is_empty());
    }

    #[test]
    fn resolve_requires_selection() {
        let mut active = ActiveEffects::default();
        assert!(TriggerState::Pending(EmotionKind::Negative)
            .resolve(None, &mut active)
            .is_err());
    }

    #[test]
    fn remove_reports_absence() {
        let mut active = ActiveEffects::default();
        let id = StatusEffectId::new();
        assert!(!active.remove(id));
        assert!(active.insert(id));
        assert!(!active.insert(id));
        assert!(active.remove(id));
    }
}
