//! Direct stat edits from the table (damage taken, XP awarded, composure
//! checks).

use serde::{Deserialize, Serialize};

use super::Character;
use crate::value_objects::{
    apply_exhaustion, apply_hp, apply_pu, apply_stamina, CheckResult, PuOutcome,
};

/// Absolute target values. `None` leaves a pool unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatUpdate {
    pub current_hp: Option<i32>,
    pub stamina_points: Option<i32>,
    pub exhaustion_level: Option<i32>,
    pub experience_points: Option<i64>,
    pub current_pu: Option<i32>,
    /// Result of the check that moved composure, if any
    pub check_result: Option<CheckResult>,
}

impl StatUpdate {
    pub fn is_empty(&self) -> bool {
        self.current_hp.is_none()
            && self.stamina_points.is_none()
            && self.exhaustion_level.is_none()
            && self.experience_points.is_none()
            && self.current_pu.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatUpdateOutcome {
    /// At least one field was supplied
    pub updated: bool,
    /// Present when `current_pu` was supplied
    pub pu: Option<PuOutcome>,
}

impl Character {
    /// Apply every supplied target, each through its pool's clamp.
    pub fn apply_stat_update(&mut self, update: &StatUpdate) -> StatUpdateOutcome {
        if let Some(target) = update.current_hp {
            self.current_hp = apply_hp(0, self.max_hp, target);
        }
        if let Some(target) = update.stamina_points {
            self.stamina = apply_stamina(0, target);
        }
        if let Some(target) = update.exhaustion_level {
            self.exhaustion = apply_exhaustion(0, target);
        }
        if let Some(target) = update.experience_points {
            self.experience = u32::try_from(target.max(0)).unwrap_or(u32::MAX);
        }

        let pu = update.current_pu.map(|target| {
            let outcome = apply_pu(self.current_pu, self.base_pu, target, update.check_result);
            self.current_pu = outcome.current;
            outcome
        });

        StatUpdateOutcome {
            updated: !update.is_empty(),
            pu,
        }
    }
}
