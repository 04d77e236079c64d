//! Experience-gated leveling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Character;
use crate::error::DomainError;
use crate::value_objects::{base_pu_for, Branch, Skill};

pub const MAX_LEVEL: u8 = 10;
/// Skill points that must be spent on every level up.
pub const SKILL_POINTS_PER_LEVEL: u32 = 3;

/// Total experience required to reach each level, indexed by `level - 1`.
const XP_THRESHOLDS: [u32; MAX_LEVEL as usize] =
    [0, 300, 900, 2700, 6500, 14000, 23000, 34000, 48000, 64000];

/// Experience needed to reach `level`, `None` outside `1..=10`.
pub fn xp_for_level(level: u8) -> Option<u32> {
    let index = usize::from(level).checked_sub(1)?;
    XP_THRESHOLDS.get(index).copied()
}

/// One level's worth of choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpRequest {
    /// Rolled hit-die result, before the endurance modifier
    pub hp_roll: i32,
    /// Branch key to raise by one, e.g. `"medic"`
    pub branch: String,
    /// Skill name to points. Entries `<= 0` are ignored but still validated.
    #[serde(default)]
    pub skill_points: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpSummary {
    pub new_level: u8,
    pub hp_gained: i32,
    pub branch: Branch,
    pub branch_level: u8,
    pub raised_skills: Vec<(Skill, u8)>,
    pub base_pu: i32,
}

impl Character {
    /// Advance one level.
    ///
    /// Steps run in order on a copy: experience gate, level, hit points,
    /// branch, skill points, stamina, base PU. Any rejection leaves `self`
    /// untouched.
    pub fn level_up(&mut self, request: &LevelUpRequest) -> Result<LevelUpSummary, DomainError> {
        if request.hp_roll < 0 {
            return Err(DomainError::validation("hp roll cannot be negative"));
        }

        if self.level >= MAX_LEVEL {
            return Err(DomainError::LevelCapReached(self.level));
        }
        let next_level = self.level + 1;
        let required = xp_for_level(next_level).ok_or(DomainError::LevelCapReached(self.level))?;
        if self.experience < required {
            return Err(DomainError::InsufficientExperience {
                next_level,
                required,
                current: self.experience,
            });
        }

        let mut next = self.clone();
        next.level = next_level;

        let hp_gained = request
            .hp_roll
            .saturating_add(next.skills.modifier(Skill::Endurance));
        next.max_hp = next.max_hp.saturating_add(hp_gained);
        next.current_hp = next.max_hp;

        let branch: Branch = request.branch.parse()?;
        let branch_level = next.branches.increment(branch)?;

        let raised_skills = next.spend_skill_points(&request.skill_points)?;

        next.stamina = next.stamina.saturating_add(1);
        next.base_pu = base_pu_for(next.skills.modifier(Skill::SelfControl));

        *self = next;
        Ok(LevelUpSummary {
            new_level: next_level,
            hp_gained,
            branch,
            branch_level,
            raised_skills,
            base_pu: self.base_pu,
        })
    }

    fn spend_skill_points(
        &mut self,
        points: &BTreeMap<String, i32>,
    ) -> Result<Vec<(Skill, u8)>, DomainError> {
        let parsed = points
            .iter()
            .map(|(name, amount)| name.parse::<Skill>().map(|skill| (skill, *amount)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut spent: u32 = 0;
        let mut raised = Vec::new();
        for (skill, amount) in parsed {
            if amount <= 0 {
                continue;
            }
            let amount = u32::try_from(amount).unwrap_or(u32::MAX);
            spent = spent.saturating_add(amount);
            let by = u8::try_from(amount).map_err(|_| DomainError::SkillCapExceeded {
                skill,
                value: u32::from(self.skills.get(skill)).saturating_add(amount),
            })?;
            raised.push((skill, self.skills.raise(skill, by)?));
        }

        if spent != SKILL_POINTS_PER_LEVEL {
            return Err(DomainError::PointBudgetMismatch {
                expected: SKILL_POINTS_PER_LEVEL,
                spent,
            });
        }
        Ok(raised)
    }
}
